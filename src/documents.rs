//! XML document handling
//!
//! This module turns XML text into a namespace-resolved element tree that the
//! typed decoders in [`crate::codec`] walk. Parsing is bounded by
//! [`Limits`] and DOCTYPE declarations are rejected outright.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName, XSI_NAMESPACE};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub name: QName,
    /// Element attributes, namespace declarations excluded
    pub attributes: IndexMap<QName, String>,
    /// Character data directly inside this element, untrimmed
    pub text: String,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace scope in effect at this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.name.namespace.as_deref()
    }

    /// Get an unqualified attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value by qualified name
    pub fn attribute_qname(&self, qname: &QName) -> Option<&str> {
        self.attributes.get(qname).map(|s| s.as_str())
    }

    /// The resolved `xsi:type` of this element, if any
    pub fn xsi_type(&self) -> Result<Option<QName>> {
        match self.attribute_qname(&QName::namespaced(XSI_NAMESPACE, "type")) {
            Some(value) => self.namespaces.resolve(value.trim()).map(Some),
            None => Ok(None),
        }
    }

    /// Whether the element carries `xsi:nil="true"`
    pub fn is_nil(&self) -> bool {
        matches!(
            self.attribute_qname(&QName::namespaced(XSI_NAMESPACE, "nil"))
                .map(str::trim),
            Some("true") | Some("1")
        )
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// All child elements with the given local name, in document order
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }
}

/// XML Document representation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml, &Limits::default())
    }

    /// Parse an XML document from a string
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut element_count = 0usize;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element =
                        Self::parse_element(&e, element_stack.last().map(|p| &p.namespaces), limits)?;
                    element_count += 1;
                    limits.check_elements(element_count)?;
                    element_stack.push(element);
                    limits.check_xml_depth(element_stack.len())?;
                }
                Ok(Event::End(_)) => {
                    let current = element_stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unexpected closing tag".to_string()))?;
                    Self::attach(&mut element_stack, &mut root, current)?;
                }
                Ok(Event::Empty(e)) => {
                    let element =
                        Self::parse_element(&e, element_stack.last().map(|p| &p.namespaces), limits)?;
                    element_count += 1;
                    limits.check_elements(element_count)?;
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    Self::attach(&mut element_stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?;
                    match element_stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(Error::Xml(
                                "text content outside the root element".to_string(),
                            ))
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| Error::Xml(format!("Invalid CDATA content: {}", e)))?;
                    if let Some(current) = element_stack.last_mut() {
                        current.text.push_str(text);
                    }
                }
                Ok(Event::DocType(_)) => {
                    return Err(Error::Xml(
                        "DOCTYPE declarations are not allowed".to_string(),
                    ))
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore declarations, comments and processing instructions
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(Error::Xml(format!(
                "unexpected end of document inside '{}'",
                open.local_name()
            )));
        }

        let root = root.ok_or_else(|| Error::Xml("document has no root element".to_string()))?;
        tracing::debug!(
            root = %root.name,
            elements = element_count,
            bytes = xml.len(),
            "parsed XML document"
        );
        Ok(Self { root })
    }

    fn attach(
        stack: &mut [Element],
        root: &mut Option<Element>,
        element: Element,
    ) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.add_child(element);
        } else if root.is_some() {
            return Err(Error::Xml("document has more than one root element".to_string()));
        } else {
            *root = Some(element);
        }
        Ok(())
    }

    /// Parse element from BytesStart event
    fn parse_element(
        start: &BytesStart,
        parent: Option<&NamespaceContext>,
        limits: &Limits,
    ) -> Result<Element> {
        let mut namespaces = parent.cloned().unwrap_or_default();
        let mut raw_attributes = Vec::new();

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .into_owned();

            // Handle namespace declarations
            if attr_name == "xmlns" {
                namespaces.set_default_namespace(attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.add_prefix(prefix, attr_value);
            } else {
                raw_attributes.push((attr_name, attr_value));
            }
        }
        limits.check_attributes(raw_attributes.len())?;

        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?;

        let mut element = Element::new(namespaces.resolve(name)?);
        for (attr_name, attr_value) in raw_attributes {
            let qname = namespaces.resolve_attribute(&attr_name)?;
            element.attributes.insert(qname, attr_value);
        }
        element.namespaces = namespaces;

        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{PBM_NAMESPACE, XSD_NAMESPACE};

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<PbmProfileId xmlns="urn:pbm"><uniqueId>abc</uniqueId></PbmProfileId>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root;
        assert_eq!(root.local_name(), "PbmProfileId");
        assert_eq!(root.namespace(), Some(PBM_NAMESPACE));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "uniqueId");
        assert_eq!(root.children[0].namespace(), Some(PBM_NAMESPACE));
        assert_eq!(root.children[0].text, "abc");
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let xml = r#"<a><name>  padded  </name><empty/></a>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.root.child("name").unwrap().text, "  padded  ");
        assert_eq!(doc.root.child("empty").unwrap().text, "");
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = r#"<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.root.child("b").unwrap().text, "x & y");
        assert_eq!(doc.root.child("c").unwrap().text, "<raw>");
    }

    #[test]
    fn test_xsi_type_resolution() {
        let xml = r#"<value xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xsi:type="xsd:int">5</value>"#;
        let doc = Document::from_string(xml).unwrap();

        let xsi_type = doc.root.xsi_type().unwrap().unwrap();
        assert_eq!(xsi_type, QName::namespaced(XSD_NAMESPACE, "int"));
        assert!(doc.root.attribute("type").is_none());
    }

    #[test]
    fn test_nested_scope_overrides_default_namespace() {
        let xml = r#"<a xmlns="urn:pbm"><b xmlns="urn:vim25"><c/></b><d/></a>"#;
        let doc = Document::from_string(xml).unwrap();

        let b = doc.root.child("b").unwrap();
        assert_eq!(b.child("c").unwrap().namespace(), Some("urn:vim25"));
        assert_eq!(doc.root.child("d").unwrap().namespace(), Some(PBM_NAMESPACE));
    }

    #[test]
    fn test_nil_detection() {
        let xml = r#"<a xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><b xsi:nil="true"/><c/></a>"#;
        let doc = Document::from_string(xml).unwrap();

        assert!(doc.root.child("b").unwrap().is_nil());
        assert!(!doc.root.child("c").unwrap().is_nil());
    }

    #[test]
    fn test_unqualified_attribute() {
        let xml = r#"<_this type="PbmServiceInstance">ServiceInstance</_this>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.root.attribute("type"), Some("PbmServiceInstance"));
        assert_eq!(doc.root.text, "ServiceInstance");
    }

    #[test]
    fn test_children_named() {
        let xml = r#"<root><hub/><other/><hub/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.root.children_named("hub").count(), 2);
    }

    #[test]
    fn test_rejects_doctype() {
        let xml = r#"<!DOCTYPE a [<!ENTITY x "y">]><a/>"#;
        assert!(matches!(Document::from_string(xml), Err(Error::Xml(_))));
    }

    #[test]
    fn test_rejects_unknown_prefix() {
        let xml = r#"<p:a/>"#;
        assert!(matches!(Document::from_string(xml), Err(Error::Namespace(_))));
    }

    #[test]
    fn test_rejects_unclosed_and_empty_documents() {
        assert!(Document::from_string("<a><b></b>").is_err());
        assert!(Document::from_string("   ").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let limits = Limits::new().with_max_xml_depth(2);
        assert!(Document::parse("<a><b/></a>", &limits).is_ok());
        assert!(matches!(
            Document::parse("<a><b><c/></b></a>", &limits),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_size_and_element_limits() {
        let limits = Limits::new().with_max_xml_size(8);
        assert!(matches!(
            Document::parse("<a><b/><c/></a>", &limits),
            Err(Error::LimitExceeded(_))
        ));

        let limits = Limits::new().with_max_elements(2);
        assert!(matches!(
            Document::parse("<a><b/><c/></a>", &limits),
            Err(Error::LimitExceeded(_))
        ));
    }
}
