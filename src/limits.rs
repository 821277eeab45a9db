//! Limits and constraints for PBM document processing
//!
//! Responses from a storage policy service can be large (compliance results
//! for every disk of every VM). These limits keep a malformed or hostile
//! document from exhausting memory before typed decoding even starts.

use crate::error::{Error, Result};

/// Resource bounds applied while a document is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum XML document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of elements in one document
    pub max_elements: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 64 * 1024 * 1024, // 64 MB
            max_elements: 2_000_000,
            max_attributes: 64,
        }
    }
}

impl Limits {
    /// Same as [`Limits::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter limits for documents from an untrusted endpoint
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 64,
            max_xml_size: 4 * 1024 * 1024, // 4 MB
            max_elements: 100_000,
            max_attributes: 16,
        }
    }

    /// Looser limits for bulk exports such as full compliance dumps
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 4096,
            max_xml_size: 1 << 30,
            max_elements: 50_000_000,
            max_attributes: 1024,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_xml_depth(mut self, depth: usize) -> Self {
        self.max_xml_depth = depth;
        self
    }

    /// Set the maximum document size
    pub fn with_max_xml_size(mut self, size: usize) -> Self {
        self.max_xml_size = size;
        self
    }

    /// Set the maximum element count
    pub fn with_max_elements(mut self, count: usize) -> Self {
        self.max_elements = count;
        self
    }

    /// Set the maximum attribute count per element
    pub fn with_max_attributes(mut self, count: usize) -> Self {
        self.max_attributes = count;
        self
    }

    /// Check the nesting depth of the element being opened
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        exceeds("nesting depth", depth, self.max_xml_depth)
    }

    /// Check the size of a document in bytes
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        exceeds("document size in bytes", size, self.max_xml_size)
    }

    /// Check the running element count
    pub fn check_elements(&self, count: usize) -> Result<()> {
        exceeds("element count", count, self.max_elements)
    }

    /// Check the attribute count of one element
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        exceeds("attribute count", count, self.max_attributes)
    }
}

fn exceeds(what: &str, actual: usize, max: usize) -> Result<()> {
    if actual <= max {
        return Ok(());
    }
    Err(Error::LimitExceeded(format!("{} {} is over the limit of {}", what, actual, max)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sit_between_strict_and_permissive() {
        let (strict, default, permissive) = (Limits::strict(), Limits::default(), Limits::permissive());
        assert!(strict.max_xml_depth < default.max_xml_depth);
        assert!(default.max_xml_depth < permissive.max_xml_depth);
        assert!(strict.max_xml_size < default.max_xml_size);
        assert!(default.max_xml_size < permissive.max_xml_size);
    }

    #[test]
    fn test_depth_bound_is_inclusive() {
        let limits = Limits::strict();
        assert!(limits.check_xml_depth(64).is_ok());
        assert!(limits.check_xml_depth(65).is_err());
    }

    #[test]
    fn test_size_error_names_the_limit() {
        let err = Limits::default().check_xml_size(200 * 1024 * 1024).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
        assert!(err.to_string().contains("document size"));
    }

    #[test]
    fn test_builder_overrides() {
        let limits = Limits::new().with_max_elements(3).with_max_attributes(1);
        assert!(limits.check_elements(3).is_ok());
        assert!(limits.check_elements(4).is_err());
        assert!(limits.check_attributes(2).is_err());
    }
}
