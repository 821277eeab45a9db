//! XML output for typed values

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::ToXml;
use crate::error::{Error, Result};
use crate::namespaces::{PBM_NAMESPACE, ROOT_PREFIXES};

/// Configuration for encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level; `None` writes everything on one line
    indent: Option<usize>,
    /// Whether to start the document with an XML declaration
    xml_declaration: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
        }
    }
}

impl EncodeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output without a declaration
    pub fn compact() -> Self {
        Self {
            indent: None,
            xml_declaration: false,
        }
    }

    /// Get the indentation width
    pub fn indent(&self) -> Option<usize> {
        self.indent
    }

    /// Whether an XML declaration is written
    pub fn xml_declaration(&self) -> bool {
        self.xml_declaration
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Set whether an XML declaration is written
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }
}

/// Streaming writer that typed values encode themselves into
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Create a writer; emits the XML declaration if configured
    pub fn new(options: &EncodeOptions) -> Result<Self> {
        let writer = match options.indent() {
            Some(width) if width > 0 => Writer::new_with_indent(Vec::new(), b' ', width),
            _ => Writer::new(Vec::new()),
        };
        let mut this = Self { writer };
        if options.xml_declaration() {
            this.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        Ok(this)
    }

    /// Write the document element, declaring the PBM namespaces on it
    pub fn write_root<T: ToXml + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        self.write_named(name, value, true)
    }

    /// Write one child element
    pub fn write_element<T: ToXml + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        self.write_named(name, value, false)
    }

    /// Write a child element only when the value is present
    pub fn write_optional<T: ToXml>(&mut self, name: &str, value: &Option<T>) -> Result<()> {
        if let Some(value) = value {
            self.write_element(name, value)?;
        }
        Ok(())
    }

    /// Write one child element per value
    pub fn write_all<T: ToXml>(&mut self, name: &str, values: &[T]) -> Result<()> {
        for value in values {
            self.write_element(name, value)?;
        }
        Ok(())
    }

    /// Finish and return the document text
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::Encode(format!("output is not UTF-8: {}", e)))
    }

    fn write_named<T: ToXml + ?Sized>(&mut self, name: &str, value: &T, root: bool) -> Result<()> {
        let mut start = BytesStart::new(name);

        if root {
            start.push_attribute(("xmlns", PBM_NAMESPACE));
            for (prefix, uri) in ROOT_PREFIXES {
                let key = format!("xmlns:{}", prefix);
                start.push_attribute((key.as_str(), *uri));
            }
        }

        if let Some(xsi_type) = value.xsi_type() {
            start.push_attribute(("xsi:type", xsi_type.as_ref()));
        }

        for (key, attr_value) in value.xml_attributes() {
            start.push_attribute((key, attr_value.as_str()));
        }

        match value.xml_text() {
            // Empty simple content stays a single tag so indentation
            // never leaks into the value
            Some(text) if text.is_empty() => self.emit(Event::Empty(start)),
            Some(text) => {
                self.emit(Event::Start(start))?;
                self.emit(Event::Text(BytesText::new(&text)))?;
                self.emit(Event::End(BytesEnd::new(name)))
            }
            None => {
                self.emit(Event::Start(start))?;
                value.write_children(self)?;
                self.emit(Event::End(BytesEnd::new(name)))
            }
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Encode(e.to_string()))
    }
}
