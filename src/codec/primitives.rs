//! Codecs for the XSD built-in types used by the schema

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use super::{FromXml, ToXml, XmlType};
use crate::documents::Element;
use crate::error::{DecodeError, Result};

fn invalid(type_name: &'static str, text: &str, reason: impl std::fmt::Display) -> crate::error::Error {
    DecodeError::new(format!("invalid {} value '{}': {}", type_name, text, reason))
        .with_type_name(type_name)
        .into()
}

impl XmlType for String {
    const TYPE_NAME: &'static str = "string";
}

impl ToXml for String {
    fn xml_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl FromXml for String {
    fn from_xml(element: &Element) -> Result<Self> {
        Ok(element.text.clone())
    }
}

impl XmlType for bool {
    const TYPE_NAME: &'static str = "boolean";
}

impl ToXml for bool {
    fn xml_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FromXml for bool {
    fn from_xml(element: &Element) -> Result<Self> {
        match element.text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(invalid(Self::TYPE_NAME, other, "expected true, false, 1 or 0")),
        }
    }
}

macro_rules! integer_codec {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl XmlType for $ty {
                const TYPE_NAME: &'static str = $name;
            }

            impl ToXml for $ty {
                fn xml_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }

            impl FromXml for $ty {
                fn from_xml(element: &Element) -> Result<Self> {
                    let text = element.text.trim();
                    // xsd integers allow a leading '+', which str::parse also accepts
                    text.parse::<$ty>().map_err(|e| invalid($name, text, e))
                }
            }
        )*
    };
}

integer_codec!(i16 => "short", i32 => "int", i64 => "long");

impl XmlType for f64 {
    const TYPE_NAME: &'static str = "double";
}

/// Lexical form of an `xsd:double`
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        (if value > 0.0 { "INF" } else { "-INF" }).to_string()
    } else {
        value.to_string()
    }
}

/// Parse the lexical form of an `xsd:double`
pub(crate) fn parse_double(text: &str) -> Result<f64> {
    match text.trim() {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        text => {
            // Rust also accepts "inf"/"infinity", which xsd:double does not
            if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                return Err(invalid(f64::TYPE_NAME, text, "not a decimal or scientific number"));
            }
            text.parse::<f64>().map_err(|e| invalid(f64::TYPE_NAME, text, e))
        }
    }
}

impl ToXml for f64 {
    fn xml_text(&self) -> Option<String> {
        Some(format_double(*self))
    }
}

impl FromXml for f64 {
    fn from_xml(element: &Element) -> Result<Self> {
        parse_double(&element.text)
    }
}

impl XmlType for DateTime<Utc> {
    const TYPE_NAME: &'static str = "dateTime";
}

impl ToXml for DateTime<Utc> {
    fn xml_text(&self) -> Option<String> {
        let text = self.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        // xsd:dateTime writes years past 9999 without chrono's leading '+'
        Some(match text.strip_prefix('+') {
            Some(unsigned) => unsigned.to_string(),
            None => text,
        })
    }
}

impl FromXml for DateTime<Utc> {
    fn from_xml(element: &Element) -> Result<Self> {
        let text = element.text.trim();
        if let Ok(value) = DateTime::parse_from_rfc3339(text) {
            return Ok(value.with_timezone(&Utc));
        }
        // Without an offset, or in UTC with a year past 9999
        let local = text.strip_suffix('Z').unwrap_or(text);
        NaiveDateTime::parse_from_str(&signed_year(local), "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|e| invalid(Self::TYPE_NAME, text, e))
    }
}

/// chrono reads at most four unsigned year digits; longer years need a sign
fn signed_year(text: &str) -> Cow<'_, str> {
    match text.find('-') {
        Some(end) if end > 4 && text[..end].bytes().all(|b| b.is_ascii_digit()) => {
            Cow::Owned(format!("+{}", text))
        }
        _ => Cow::Borrowed(text),
    }
}
