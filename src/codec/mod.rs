//! Typed XML codec
//!
//! This module maps between the element tree of [`crate::documents`] and the
//! typed schema values of this crate.
//!
//! - [`XmlType`] names a type as the schema does.
//! - [`ToXml`] describes how a value becomes one element: its `xsi:type`,
//!   attributes, and either simple text or child elements.
//! - [`FromXml`] rebuilds a value from one element.
//!
//! Child elements are matched by local name; namespaces matter only for
//! resolving `xsi:type` values.

mod primitives;
mod writer;

pub use writer::{EncodeOptions, XmlWriter};

pub(crate) use primitives::{format_double, parse_double};

use std::borrow::Cow;

use crate::documents::{Document, Element};
use crate::error::{DecodeError, Error, Result};
use crate::limits::Limits;
use crate::names::validate_ncname;

/// A type with a schema name
pub trait XmlType {
    /// Local name of the type in its schema namespace
    const TYPE_NAME: &'static str;
}

/// Encoding of a value as the content of one element
pub trait ToXml {
    /// `xsi:type` to write on the element, if the slot is polymorphic
    fn xsi_type(&self) -> Option<Cow<'static, str>> {
        None
    }

    /// Unqualified attributes to write on the element
    fn xml_attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Simple content; `None` for complex content
    fn xml_text(&self) -> Option<String> {
        None
    }

    /// Child elements of complex content
    fn write_children(&self, _writer: &mut XmlWriter) -> Result<()> {
        Ok(())
    }
}

/// Decoding of a value from one element
pub trait FromXml: Sized {
    /// Build the value from the element that holds it
    fn from_xml(element: &Element) -> Result<Self>;
}

impl<T: ToXml + ?Sized> ToXml for Box<T> {
    fn xsi_type(&self) -> Option<Cow<'static, str>> {
        (**self).xsi_type()
    }

    fn xml_attributes(&self) -> Vec<(&'static str, String)> {
        (**self).xml_attributes()
    }

    fn xml_text(&self) -> Option<String> {
        (**self).xml_text()
    }

    fn write_children(&self, writer: &mut XmlWriter) -> Result<()> {
        (**self).write_children(writer)
    }
}

impl<T: FromXml> FromXml for Box<T> {
    fn from_xml(element: &Element) -> Result<Self> {
        T::from_xml(element).map(Box::new)
    }
}

/// Decode the single required child `name`
pub fn read_required<T: FromXml>(element: &Element, name: &str) -> Result<T> {
    let child = element
        .child(name)
        .ok_or_else(|| Error::from(DecodeError::missing(element.local_name(), name)))?;
    T::from_xml(child).map_err(|e| e.within(name))
}

/// Decode the optional child `name`; absent or `xsi:nil` gives `None`
pub fn read_optional<T: FromXml>(element: &Element, name: &str) -> Result<Option<T>> {
    match element.child(name) {
        Some(child) if child.is_nil() => Ok(None),
        Some(child) => T::from_xml(child).map(Some).map_err(|e| e.within(name)),
        None => Ok(None),
    }
}

/// Decode every child named `name`, in document order
pub fn read_repeated<T: FromXml>(element: &Element, name: &str) -> Result<Vec<T>> {
    element
        .children_named(name)
        .filter(|child| !child.is_nil())
        .map(|child| T::from_xml(child).map_err(|e| e.within(name)))
        .collect()
}

/// Encode `value` as a standalone document whose root element is `root`
pub fn to_xml_string<T: ToXml + ?Sized>(
    root: &str,
    value: &T,
    options: &EncodeOptions,
) -> Result<String> {
    validate_ncname(root)?;
    let mut writer = XmlWriter::new(options)?;
    writer.write_root(root, value)?;
    writer.into_string()
}

/// Encode `value` under its own type name with default options
pub fn to_xml<T: ToXml + XmlType + ?Sized>(value: &T) -> Result<String> {
    to_xml_string(T::TYPE_NAME, value, &EncodeOptions::default())
}

/// Decode a value from the root element of `xml`
pub fn from_xml_str<T: FromXml>(xml: &str, limits: &Limits) -> Result<T> {
    let document = Document::parse(xml, limits)?;
    from_element(&document.root)
}

/// Decode a value from `xml` with default limits
pub fn from_xml<T: FromXml>(xml: &str) -> Result<T> {
    from_xml_str(xml, &Limits::default())
}

/// Decode a value from an already parsed element
pub fn from_element<T: FromXml>(element: &Element) -> Result<T> {
    T::from_xml(element).map_err(|e| e.within(element.local_name()))
}
