//! Namespaces of PBM documents and prefix resolution
//!
//! PBM messages mix three vocabularies: `urn:pbm` itself, `urn:vim25` for
//! the vSphere base types and faults, and XML Schema for primitive
//! `xsi:type` values.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// PBM schema namespace
pub const PBM_NAMESPACE: &str = "urn:pbm";

/// vSphere core schema namespace (referenced base types and faults)
pub const VIM25_NAMESPACE: &str = "urn:vim25";

/// XSD namespace (primitive type names in `xsi:type`)
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XSI namespace (`xsi:type`, `xsi:nil`)
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes declared on every root element the writer produces
pub const ROOT_PREFIXES: &[(&str, &str)] = &[
    ("vim25", VIM25_NAMESPACE),
    ("xsd", XSD_NAMESPACE),
    ("xsi", XSI_NAMESPACE),
];

/// Expanded name: namespace URI plus local part
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// `None` for names in no namespace
    pub namespace: Option<String>,
    /// Local part
    pub local_name: String,
}

impl QName {
    /// Name in no namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Name in `namespace`
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Check namespace and local name at once
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace scope for resolving prefixes
///
/// Each parsed element carries the scope in effect at that element: the
/// parent's declarations plus its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    prefixes: IndexMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `prefix`, shadowing an outer declaration of it
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace; an empty URI undeclares it
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.default_namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
    }

    /// URI bound to `prefix`; `xml` is always bound
    pub fn namespace_for(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// URI of unprefixed element names, if one is declared
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Resolve a prefixed element name to a QName
    ///
    /// Unprefixed names take the default namespace.
    pub fn resolve(&self, prefixed_name: &str) -> Result<QName> {
        match prefixed_name.split_once(':') {
            Some((prefix, local)) => self
                .namespace_for(prefix)
                .map(|namespace| QName::namespaced(namespace, local))
                .ok_or_else(|| Error::Namespace(format!("prefix '{}' is not declared", prefix))),
            None => Ok(QName {
                namespace: self.default_namespace.clone(),
                local_name: prefixed_name.to_string(),
            }),
        }
    }

    /// Resolve a prefixed attribute name to a QName
    ///
    /// Unprefixed attributes are in no namespace.
    pub fn resolve_attribute(&self, prefixed_name: &str) -> Result<QName> {
        if prefixed_name.contains(':') {
            self.resolve(prefixed_name)
        } else {
            Ok(QName::local(prefixed_name))
        }
    }
}
