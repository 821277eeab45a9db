//! XML name checks
//!
//! Root element names given to the writer (the CLI's `--root`, say) are
//! checked here before any bytes are emitted.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}]*$")
        .expect("NCName pattern is valid")
});

/// Whether `name` is an NCName (an XML name without a colon)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

/// Upper-case the first character (`string` -> `String`)
///
/// Used to derive `ArrayOfX` wrapper names from item type names.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("PbmProfileId"));
        assert!(is_valid_ncname("_this"));
        assert!(is_valid_ncname("my-element.v2"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("123element"));
        assert!(!is_valid_ncname("xsd:int"));
        assert!(!is_valid_ncname("has space"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("string"), "String");
        assert_eq!(capitalize("PbmProfileId"), "PbmProfileId");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_validate_ncname() {
        assert!(validate_ncname("uniqueId").is_ok());
        assert!(matches!(validate_ncname("1abc"), Err(Error::Name(_))));
    }
}
