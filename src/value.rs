//! Values of `xsd:anyType` slots
//!
//! Capability property values, range bounds and similar slots are typed
//! `xsd:anyType` in the schema; the concrete type travels as `xsi:type`.
//! [`AnyValue`] is the closed set of payloads PBM servers put there.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::arrays::{ArrayOfInt, ArrayOfLong, ArrayOfString};
use crate::codec::{FromXml, ToXml, XmlType, XmlWriter};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::XSD_NAMESPACE;
use crate::types::capability::{
    PbmCapabilityDescription, PbmCapabilityDiscreteSet, PbmCapabilityRange, PbmCapabilityTimeSpan,
};

/// Payload of an `xsd:anyType` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyValue {
    /// `xsd:boolean`
    #[serde(rename = "boolean")]
    Boolean(bool),
    /// `xsd:short`
    #[serde(rename = "short")]
    Short(i16),
    /// `xsd:int`
    #[serde(rename = "int")]
    Int(i32),
    /// `xsd:long`
    #[serde(rename = "long")]
    Long(i64),
    /// `xsd:double`
    #[serde(rename = "double", with = "xsd_double")]
    Double(f64),
    /// `xsd:string`
    #[serde(rename = "string")]
    String(String),
    /// `xsd:dateTime`
    #[serde(rename = "dateTime")]
    DateTime(DateTime<Utc>),
    /// `ArrayOfString`
    #[serde(rename = "ArrayOfString")]
    StringArray(ArrayOfString),
    /// `ArrayOfInt`
    #[serde(rename = "ArrayOfInt")]
    IntArray(ArrayOfInt),
    /// `ArrayOfLong`
    #[serde(rename = "ArrayOfLong")]
    LongArray(ArrayOfLong),
    /// Closed interval of values
    #[serde(rename = "PbmCapabilityRange")]
    Range(Box<PbmCapabilityRange>),
    /// Enumerated set of values
    #[serde(rename = "PbmCapabilityDiscreteSet")]
    DiscreteSet(PbmCapabilityDiscreteSet),
    /// Duration with a unit
    #[serde(rename = "PbmCapabilityTimeSpan")]
    TimeSpan(PbmCapabilityTimeSpan),
    /// Value with a localized description
    #[serde(rename = "PbmCapabilityDescription")]
    Description(Box<PbmCapabilityDescription>),
}

impl AnyValue {
    /// Schema name of the payload type, prefixed `xsd:` for built-ins
    pub fn qualified_type_name(&self) -> Cow<'static, str> {
        match self {
            AnyValue::Boolean(_) => Cow::Borrowed("xsd:boolean"),
            AnyValue::Short(_) => Cow::Borrowed("xsd:short"),
            AnyValue::Int(_) => Cow::Borrowed("xsd:int"),
            AnyValue::Long(_) => Cow::Borrowed("xsd:long"),
            AnyValue::Double(_) => Cow::Borrowed("xsd:double"),
            AnyValue::String(_) => Cow::Borrowed("xsd:string"),
            AnyValue::DateTime(_) => Cow::Borrowed("xsd:dateTime"),
            AnyValue::StringArray(_) => Cow::Owned(ArrayOfString::type_name()),
            AnyValue::IntArray(_) => Cow::Owned(ArrayOfInt::type_name()),
            AnyValue::LongArray(_) => Cow::Owned(ArrayOfLong::type_name()),
            AnyValue::Range(_) => Cow::Borrowed(PbmCapabilityRange::TYPE_NAME),
            AnyValue::DiscreteSet(_) => Cow::Borrowed(PbmCapabilityDiscreteSet::TYPE_NAME),
            AnyValue::TimeSpan(_) => Cow::Borrowed(PbmCapabilityTimeSpan::TYPE_NAME),
            AnyValue::Description(_) => Cow::Borrowed(PbmCapabilityDescription::TYPE_NAME),
        }
    }

    /// The string payload, if this is an `xsd:string`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any integer payload widened to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AnyValue::Short(v) => Some(i64::from(*v)),
            AnyValue::Int(v) => Some(i64::from(*v)),
            AnyValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean payload, if this is an `xsd:boolean`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Default for AnyValue {
    fn default() -> Self {
        AnyValue::String(String::new())
    }
}

impl From<bool> for AnyValue {
    fn from(value: bool) -> Self {
        AnyValue::Boolean(value)
    }
}

impl From<i32> for AnyValue {
    fn from(value: i32) -> Self {
        AnyValue::Int(value)
    }
}

impl From<i64> for AnyValue {
    fn from(value: i64) -> Self {
        AnyValue::Long(value)
    }
}

impl From<f64> for AnyValue {
    fn from(value: f64) -> Self {
        AnyValue::Double(value)
    }
}

impl From<String> for AnyValue {
    fn from(value: String) -> Self {
        AnyValue::String(value)
    }
}

impl From<&str> for AnyValue {
    fn from(value: &str) -> Self {
        AnyValue::String(value.to_string())
    }
}

impl From<PbmCapabilityRange> for AnyValue {
    fn from(value: PbmCapabilityRange) -> Self {
        AnyValue::Range(Box::new(value))
    }
}

impl From<PbmCapabilityDiscreteSet> for AnyValue {
    fn from(value: PbmCapabilityDiscreteSet) -> Self {
        AnyValue::DiscreteSet(value)
    }
}

impl From<PbmCapabilityTimeSpan> for AnyValue {
    fn from(value: PbmCapabilityTimeSpan) -> Self {
        AnyValue::TimeSpan(value)
    }
}

impl XmlType for AnyValue {
    const TYPE_NAME: &'static str = "anyType";
}

impl ToXml for AnyValue {
    fn xsi_type(&self) -> Option<Cow<'static, str>> {
        Some(self.qualified_type_name())
    }

    fn xml_text(&self) -> Option<String> {
        match self {
            AnyValue::Boolean(v) => v.xml_text(),
            AnyValue::Short(v) => v.xml_text(),
            AnyValue::Int(v) => v.xml_text(),
            AnyValue::Long(v) => v.xml_text(),
            AnyValue::Double(v) => v.xml_text(),
            AnyValue::String(v) => v.xml_text(),
            AnyValue::DateTime(v) => v.xml_text(),
            _ => None,
        }
    }

    fn write_children(&self, writer: &mut XmlWriter) -> Result<()> {
        match self {
            AnyValue::StringArray(v) => v.write_children(writer),
            AnyValue::IntArray(v) => v.write_children(writer),
            AnyValue::LongArray(v) => v.write_children(writer),
            AnyValue::Range(v) => v.write_children(writer),
            AnyValue::DiscreteSet(v) => v.write_children(writer),
            AnyValue::TimeSpan(v) => v.write_children(writer),
            AnyValue::Description(v) => v.write_children(writer),
            _ => Ok(()),
        }
    }
}

impl FromXml for AnyValue {
    fn from_xml(element: &Element) -> Result<Self> {
        let qname = match element.xsi_type()? {
            Some(qname) => qname,
            None => return String::from_xml(element).map(AnyValue::String),
        };

        if qname.namespace.as_deref() == Some(XSD_NAMESPACE) {
            return match qname.local_name.as_str() {
                "boolean" => bool::from_xml(element).map(AnyValue::Boolean),
                "short" => i16::from_xml(element).map(AnyValue::Short),
                "int" => i32::from_xml(element).map(AnyValue::Int),
                "long" => i64::from_xml(element).map(AnyValue::Long),
                "double" => f64::from_xml(element).map(AnyValue::Double),
                "string" => String::from_xml(element).map(AnyValue::String),
                "dateTime" => DateTime::<Utc>::from_xml(element).map(AnyValue::DateTime),
                _ => Err(unknown(qname.local_name)),
            };
        }

        match qname.local_name.as_str() {
            "ArrayOfString" => ArrayOfString::from_xml(element).map(AnyValue::StringArray),
            "ArrayOfInt" => ArrayOfInt::from_xml(element).map(AnyValue::IntArray),
            "ArrayOfLong" => ArrayOfLong::from_xml(element).map(AnyValue::LongArray),
            "PbmCapabilityRange" => PbmCapabilityRange::from_xml(element).map(AnyValue::from),
            "PbmCapabilityDiscreteSet" => {
                PbmCapabilityDiscreteSet::from_xml(element).map(AnyValue::DiscreteSet)
            }
            "PbmCapabilityTimeSpan" => {
                PbmCapabilityTimeSpan::from_xml(element).map(AnyValue::TimeSpan)
            }
            "PbmCapabilityDescription" => PbmCapabilityDescription::from_xml(element)
                .map(|d| AnyValue::Description(Box::new(d))),
            _ => Err(unknown(qname.local_name)),
        }
    }
}

/// JSON form of an `xsd:double`: a number when finite, otherwise the
/// lexical token (`INF`, `-INF`, `NaN`)
mod xsd_double {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::codec::{format_double, parse_double};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&format_double(*value))
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lexical {
        Number(f64),
        Token(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Lexical::deserialize(deserializer)? {
            Lexical::Number(value) => Ok(value),
            Lexical::Token(text) => parse_double(&text).map_err(D::Error::custom),
        }
    }
}

fn unknown(found: String) -> Error {
    Error::UnknownType {
        expected: AnyValue::TYPE_NAME,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_xml, to_xml_string, EncodeOptions};

    fn round_trip(value: &AnyValue) -> AnyValue {
        let xml = to_xml_string("value", value, &EncodeOptions::compact()).unwrap();
        from_xml(&xml).unwrap()
    }

    #[test]
    fn test_primitive_xsi_types() {
        let xml = to_xml_string("value", &AnyValue::Int(7), &EncodeOptions::compact()).unwrap();
        assert!(xml.contains("xsi:type=\"xsd:int\""));
        assert!(xml.ends_with(">7</value>"));
    }

    #[test]
    fn test_round_trips() {
        for value in [
            AnyValue::Boolean(true),
            AnyValue::Short(-3),
            AnyValue::Long(1 << 40),
            AnyValue::Double(2.5),
            AnyValue::from("gold"),
            AnyValue::IntArray(vec![1, 2, 3].into()),
        ] {
            assert_eq!(round_trip(&value), value);
        }
    }

    #[test]
    fn test_missing_xsi_type_is_string() {
        let value: AnyValue = from_xml("<value> raw </value>").unwrap();
        assert_eq!(value.as_str(), Some(" raw "));
    }

    #[test]
    fn test_other_prefix_for_xsd_namespace() {
        let xml = r#"<value xmlns:xs="http://www.w3.org/2001/XMLSchema"
            xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xsi:type="xs:long">12</value>"#;
        let value: AnyValue = from_xml(xml).unwrap();
        assert_eq!(value.as_i64(), Some(12));
    }

    #[test]
    fn test_unknown_xsi_type() {
        let xml = r#"<value xmlns="urn:pbm"
            xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xsi:type="PbmSomethingElse"/>"#;
        let err = from_xml::<AnyValue>(xml).unwrap_err();
        assert!(matches!(err, Error::UnknownType { expected: "anyType", .. }));
    }

    #[test]
    fn test_non_finite_double_json() {
        let json = serde_json::to_value(AnyValue::Double(f64::NEG_INFINITY)).unwrap();
        assert_eq!(json, serde_json::json!({ "double": "-INF" }));
        let back: AnyValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, AnyValue::Double(f64::NEG_INFINITY));

        let nan: AnyValue = serde_json::from_str(r#"{"double":"NaN"}"#).unwrap();
        assert!(matches!(nan, AnyValue::Double(v) if v.is_nan()));

        let finite = serde_json::to_value(AnyValue::Double(2.5)).unwrap();
        assert_eq!(finite, serde_json::json!({ "double": 2.5 }));
        let integral: AnyValue = serde_json::from_str(r#"{"double":3}"#).unwrap();
        assert_eq!(integral, AnyValue::Double(3.0));

        assert!(serde_json::from_str::<AnyValue>(r#"{"double":"inf"}"#).is_err());
    }

    #[test]
    fn test_default_is_empty_string() {
        assert_eq!(AnyValue::default(), AnyValue::String(String::new()));
        assert_eq!(AnyValue::from(true).as_bool(), Some(true));
    }
}
