//! Array wrapper types
//!
//! The wire format represents a standalone sequence as a named wrapper
//! element (`ArrayOfPbmProfileId`) holding one element per item, named after
//! the item type (`PbmProfileId`). Struct fields use plain `Vec<T>`; the
//! wrappers appear where a sequence is itself a value, such as inside an
//! `xsd:anyType` slot.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::codec::{FromXml, ToXml, XmlType, XmlWriter};
use crate::documents::Element;
use crate::error::Result;
use crate::faults::PbmFaultNoPermissionEntityPrivileges;
use crate::names::capitalize;
use crate::types::capability::{
    PbmCapabilityConstraintInstance, PbmCapabilityInstance, PbmCapabilityMetadata,
    PbmCapabilityMetadataPerCategory, PbmCapabilityPropertyInstance,
    PbmCapabilityPropertyMetadata, PbmCapabilitySchema, PbmCapabilitySubProfile,
    PbmCapabilityVendorNamespaceInfo, PbmCapabilityVendorResourceTypeInfo,
};
use crate::types::compliance::{
    PbmCompliancePolicyStatus, PbmComplianceResult, PbmRollupComplianceResult,
};
use crate::types::placement::{
    AnyPlacementMatchingResources, AnyPlacementRequirement, PbmPlacementCompatibilityResult,
    PbmPlacementHub, PbmPlacementResourceUtilization,
};
use crate::types::profile::{
    AnyProfile, PbmDatastoreSpaceStatistics, PbmDefaultProfileInfo, PbmProfileId,
    PbmProfileOperationOutcome, PbmProfileResourceType, PbmProfileType, PbmQueryProfileResult,
    PbmQueryReplicationGroupResult,
};
use crate::types::service::{PbmLoggingConfiguration, PbmServerObjectRef};
use crate::value::AnyValue;

/// Ordered sequence of one element type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrayOf<T> {
    items: Vec<T>,
}

impl<T> ArrayOf<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to the items
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Take the items out
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: XmlType> ArrayOf<T> {
    /// Schema name of the wrapper (`ArrayOfString`, `ArrayOfPbmProfileId`)
    pub fn type_name() -> String {
        format!("ArrayOf{}", capitalize(T::TYPE_NAME))
    }
}

impl<T> Default for ArrayOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ArrayOf<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ArrayOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ArrayOf<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for ArrayOf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: ToXml + XmlType> ToXml for ArrayOf<T> {
    fn xsi_type(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Owned(Self::type_name()))
    }

    fn write_children(&self, writer: &mut XmlWriter) -> Result<()> {
        writer.write_all(T::TYPE_NAME, &self.items)
    }
}

impl<T: FromXml + XmlType> FromXml for ArrayOf<T> {
    fn from_xml(element: &Element) -> Result<Self> {
        let mut items = Vec::with_capacity(element.children.len());
        for child in &element.children {
            if child.local_name() == T::TYPE_NAME {
                items.push(T::from_xml(child).map_err(|e| e.within(T::TYPE_NAME))?);
            } else {
                tracing::trace!(
                    wrapper = %Self::type_name(),
                    element = child.local_name(),
                    "skipping foreign element in array wrapper"
                );
            }
        }
        Ok(Self { items })
    }
}

/// `ArrayOfString`
pub type ArrayOfString = ArrayOf<String>;
/// `ArrayOfInt`
pub type ArrayOfInt = ArrayOf<i32>;
/// `ArrayOfLong`
pub type ArrayOfLong = ArrayOf<i64>;
/// `ArrayOfAnyType`
pub type ArrayOfAnyType = ArrayOf<AnyValue>;
/// `ArrayOfPbmCapabilityConstraintInstance`
pub type ArrayOfPbmCapabilityConstraintInstance = ArrayOf<PbmCapabilityConstraintInstance>;
/// `ArrayOfPbmCapabilityInstance`
pub type ArrayOfPbmCapabilityInstance = ArrayOf<PbmCapabilityInstance>;
/// `ArrayOfPbmCapabilityMetadata`
pub type ArrayOfPbmCapabilityMetadata = ArrayOf<PbmCapabilityMetadata>;
/// `ArrayOfPbmCapabilityMetadataPerCategory`
pub type ArrayOfPbmCapabilityMetadataPerCategory = ArrayOf<PbmCapabilityMetadataPerCategory>;
/// `ArrayOfPbmCapabilityPropertyInstance`
pub type ArrayOfPbmCapabilityPropertyInstance = ArrayOf<PbmCapabilityPropertyInstance>;
/// `ArrayOfPbmCapabilityPropertyMetadata`
pub type ArrayOfPbmCapabilityPropertyMetadata = ArrayOf<PbmCapabilityPropertyMetadata>;
/// `ArrayOfPbmCapabilitySchema`
pub type ArrayOfPbmCapabilitySchema = ArrayOf<PbmCapabilitySchema>;
/// `ArrayOfPbmCapabilitySubProfile`
pub type ArrayOfPbmCapabilitySubProfile = ArrayOf<PbmCapabilitySubProfile>;
/// `ArrayOfPbmCapabilityVendorNamespaceInfo`
pub type ArrayOfPbmCapabilityVendorNamespaceInfo = ArrayOf<PbmCapabilityVendorNamespaceInfo>;
/// `ArrayOfPbmCapabilityVendorResourceTypeInfo`
pub type ArrayOfPbmCapabilityVendorResourceTypeInfo = ArrayOf<PbmCapabilityVendorResourceTypeInfo>;
/// `ArrayOfPbmCompliancePolicyStatus`
pub type ArrayOfPbmCompliancePolicyStatus = ArrayOf<PbmCompliancePolicyStatus>;
/// `ArrayOfPbmComplianceResult`
pub type ArrayOfPbmComplianceResult = ArrayOf<PbmComplianceResult>;
/// `ArrayOfPbmDatastoreSpaceStatistics`
pub type ArrayOfPbmDatastoreSpaceStatistics = ArrayOf<PbmDatastoreSpaceStatistics>;
/// `ArrayOfPbmDefaultProfileInfo`
pub type ArrayOfPbmDefaultProfileInfo = ArrayOf<PbmDefaultProfileInfo>;
/// `ArrayOfPbmFaultNoPermissionEntityPrivileges`
pub type ArrayOfPbmFaultNoPermissionEntityPrivileges = ArrayOf<PbmFaultNoPermissionEntityPrivileges>;
/// `ArrayOfPbmLoggingConfiguration`
pub type ArrayOfPbmLoggingConfiguration = ArrayOf<PbmLoggingConfiguration>;
/// `ArrayOfPbmPlacementCompatibilityResult`
pub type ArrayOfPbmPlacementCompatibilityResult = ArrayOf<PbmPlacementCompatibilityResult>;
/// `ArrayOfPbmPlacementHub`
pub type ArrayOfPbmPlacementHub = ArrayOf<PbmPlacementHub>;
/// `ArrayOfPbmPlacementMatchingResources`
pub type ArrayOfPbmPlacementMatchingResources = ArrayOf<AnyPlacementMatchingResources>;
/// `ArrayOfPbmPlacementRequirement`
pub type ArrayOfPbmPlacementRequirement = ArrayOf<AnyPlacementRequirement>;
/// `ArrayOfPbmPlacementResourceUtilization`
pub type ArrayOfPbmPlacementResourceUtilization = ArrayOf<PbmPlacementResourceUtilization>;
/// `ArrayOfPbmProfile`
pub type ArrayOfPbmProfile = ArrayOf<AnyProfile>;
/// `ArrayOfPbmProfileId`
pub type ArrayOfPbmProfileId = ArrayOf<PbmProfileId>;
/// `ArrayOfPbmProfileOperationOutcome`
pub type ArrayOfPbmProfileOperationOutcome = ArrayOf<PbmProfileOperationOutcome>;
/// `ArrayOfPbmProfileResourceType`
pub type ArrayOfPbmProfileResourceType = ArrayOf<PbmProfileResourceType>;
/// `ArrayOfPbmProfileType`
pub type ArrayOfPbmProfileType = ArrayOf<PbmProfileType>;
/// `ArrayOfPbmQueryProfileResult`
pub type ArrayOfPbmQueryProfileResult = ArrayOf<PbmQueryProfileResult>;
/// `ArrayOfPbmQueryReplicationGroupResult`
pub type ArrayOfPbmQueryReplicationGroupResult = ArrayOf<PbmQueryReplicationGroupResult>;
/// `ArrayOfPbmRollupComplianceResult`
pub type ArrayOfPbmRollupComplianceResult = ArrayOf<PbmRollupComplianceResult>;
/// `ArrayOfPbmServerObjectRef`
pub type ArrayOfPbmServerObjectRef = ArrayOf<PbmServerObjectRef>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_xml, to_xml_string, EncodeOptions};

    #[test]
    fn test_empty_after_construction() {
        let ids = ArrayOfPbmProfileId::new();
        assert!(ids.is_empty());
        assert_eq!(ids.len(), 0);
        assert!(ArrayOfString::default().items().is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut ids = ArrayOfPbmProfileId::new();
        for unique_id in ["c", "a", "b"] {
            ids.push(PbmProfileId::new(unique_id));
        }

        let order: Vec<&str> = ids.iter().map(|id| id.unique_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ArrayOfString::type_name(), "ArrayOfString");
        assert_eq!(ArrayOfLong::type_name(), "ArrayOfLong");
        assert_eq!(ArrayOfPbmPlacementHub::type_name(), "ArrayOfPbmPlacementHub");
        assert_eq!(ArrayOfPbmProfile::type_name(), "ArrayOfPbmProfile");
    }

    #[test]
    fn test_item_elements_are_named_after_item_type() {
        let values: ArrayOfString = vec!["gold".to_string(), "silver".to_string()].into();
        let xml = to_xml_string("ArrayOfString", &values, &EncodeOptions::compact()).unwrap();

        assert!(xml.contains("<string>gold</string><string>silver</string>"));
        let back: ArrayOfString = from_xml(&xml).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_foreign_children_are_skipped() {
        let xml = r#"<ArrayOfInt><int>1</int><note>x</note><int>2</int></ArrayOfInt>"#;
        let values: ArrayOfInt = from_xml(xml).unwrap();
        assert_eq!(values.into_vec(), vec![1, 2]);
    }
}
