//! Lookup of schema types and enumerations by name
//!
//! The registry lets tools work with values whose type is only known at run
//! time (a type name on a command line, say). It bridges between XML and
//! JSON: values are decoded from XML into their Rust type and then
//! serialized with serde, or the other way round.
//!
//! Polymorphic families are registered under the name of their base type, so
//! decoding `PbmProfile` honours `xsi:type` and yields any profile subtype.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{from_element, to_xml_string, EncodeOptions, FromXml, ToXml, XmlType};
use crate::documents::{Document, Element};
use crate::enums::*;
use crate::error::{Error, Result};
use crate::faults::*;
use crate::limits::Limits;
use crate::requests::*;
use crate::types::capability::*;
use crate::types::compliance::*;
use crate::types::placement::*;
use crate::types::profile::*;
use crate::types::service::*;
use crate::value::AnyValue;
use crate::vim::*;

type DecodeFn = fn(&Element) -> Result<Value>;
type EncodeFn = fn(Value, &str, &EncodeOptions) -> Result<String>;
type TemplateFn = fn() -> Result<Value>;

/// A registered complex type
#[derive(Clone, Copy)]
pub struct TypeEntry {
    /// Schema name
    pub name: &'static str,
    decode: DecodeFn,
    encode: EncodeFn,
    template: TemplateFn,
}

impl TypeEntry {
    /// JSON of the type's default value, with every field present
    pub fn template(&self) -> Result<Value> {
        (self.template)()
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry").field("name", &self.name).finish()
    }
}

/// A registered enumeration
#[derive(Clone, Copy)]
pub struct EnumEntry {
    /// Schema name
    pub name: &'static str,
    values: fn() -> Vec<&'static str>,
    check: fn(&str) -> Result<()>,
}

impl std::fmt::Debug for EnumEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumEntry").field("name", &self.name).finish()
    }
}

fn decode_as<T: FromXml + Serialize>(element: &Element) -> Result<Value> {
    let value: T = from_element(element)?;
    Ok(serde_json::to_value(value)?)
}

fn encode_as<T: ToXml + DeserializeOwned>(
    json: Value,
    root: &str,
    options: &EncodeOptions,
) -> Result<String> {
    let value: T = serde_json::from_value(json)?;
    to_xml_string(root, &value, options)
}

fn template_of<T: Default + Serialize>() -> Result<Value> {
    Ok(serde_json::to_value(T::default())?)
}

fn values_of<E: PbmEnum>() -> Vec<&'static str> {
    E::values()
}

fn check_of<E: PbmEnum>(value: &str) -> Result<()> {
    E::from_value(value).map(|_| ())
}

macro_rules! type_entries {
    ($($ty:ty),+ $(,)?) => {
        &[$(
            TypeEntry {
                name: <$ty as XmlType>::TYPE_NAME,
                decode: decode_as::<$ty>,
                encode: encode_as::<$ty>,
                template: template_of::<$ty>,
            },
        )+]
    };
}

macro_rules! enum_entries {
    ($($ty:ty),+ $(,)?) => {
        &[$(
            EnumEntry {
                name: <$ty as XmlType>::TYPE_NAME,
                values: values_of::<$ty>,
                check: check_of::<$ty>,
            },
        )+]
    };
}

static TYPES: &[TypeEntry] = type_entries![
    // vim25
    ManagedObjectReference,
    KeyAnyValue,
    LocalizableMessage,
    LocalizedMethodFault,
    FaultDomainId,
    DeviceGroupId,
    ReplicationGroupId,
    AnyValue,
    // service
    PbmAboutInfo,
    PbmServiceInstanceContent,
    PbmServerObjectRef,
    PbmExtendedElementDescription,
    PbmLoggingConfiguration,
    // capability
    PbmCapabilityMetadataUniqueId,
    PbmCapabilityPropertyInstance,
    PbmCapabilityConstraintInstance,
    PbmCapabilityInstance,
    PbmCapabilitySubProfile,
    AnyCapabilityConstraints,
    PbmCapabilitySubProfileConstraints,
    PbmCapabilityRange,
    PbmCapabilityDiscreteSet,
    PbmCapabilityTimeSpan,
    PbmCapabilityDescription,
    AnyCapabilityTypeInfo,
    PbmCapabilityGenericTypeInfo,
    PbmCapabilityPropertyMetadata,
    PbmCapabilityMetadata,
    PbmCapabilityMetadataPerCategory,
    PbmCapabilityNamespaceInfo,
    PbmCapabilitySchemaVendorInfo,
    PbmCapabilityVendorNamespaceInfo,
    PbmCapabilityVendorResourceTypeInfo,
    AnyLineOfServiceInfo,
    PbmPersistenceBasedDataServiceInfo,
    PbmVaioDataServiceInfo,
    PbmCapabilitySchema,
    // profile
    PbmProfileId,
    PbmProfileType,
    PbmProfileResourceType,
    AnyProfile,
    PbmCapabilityProfile,
    PbmDefaultCapabilityProfile,
    PbmCapabilityProfileCreateSpec,
    PbmCapabilityProfileUpdateSpec,
    PbmProfileOperationOutcome,
    PbmQueryProfileResult,
    PbmDefaultProfileInfo,
    PbmDatastoreSpaceStatistics,
    PbmQueryReplicationGroupResult,
    // compliance
    PbmComplianceOperationalStatus,
    PbmCompliancePolicyStatus,
    PbmComplianceResult,
    PbmRollupComplianceResult,
    // placement
    PbmPlacementHub,
    AnyPlacementRequirement,
    PbmPlacementCapabilityConstraintsRequirement,
    PbmPlacementCapabilityProfileRequirement,
    AnyPlacementMatchingResources,
    PbmPlacementMatchingReplicationResources,
    PbmPlacementResourceUtilization,
    PbmPlacementCompatibilityResult,
    // faults
    Fault,
    RuntimeFault,
    SecurityError,
    InvalidArgument,
    VimFault,
    NotFound,
    SystemError,
    PbmFault,
    PbmAlreadyExists,
    PbmCompatibilityCheckFault,
    PbmDefaultProfileAppliesFault,
    PbmPropertyMismatchFault,
    PbmCapabilityProfilePropertyMismatchFault,
    PbmIncompatibleVendorSpecificRuleSet,
    PbmDuplicateName,
    PbmFaultInvalidLogin,
    PbmFaultNotFound,
    PbmFaultProfileStorageFault,
    PbmFaultNoPermissionEntityPrivileges,
    PbmFaultNoPermission,
    PbmLegacyHubsNotSupported,
    PbmNonExistentHubs,
    PbmResourceInUse,
    // operation bodies
    PbmRetrieveServiceContentRequestType,
    PbmRetrieveServiceContentResponse,
    PbmFetchResourceTypeRequestType,
    PbmFetchResourceTypeResponse,
    PbmFetchVendorInfoRequestType,
    PbmFetchVendorInfoResponse,
    PbmFetchCapabilityMetadataRequestType,
    PbmFetchCapabilityMetadataResponse,
    PbmFetchCapabilitySchemaRequestType,
    PbmFetchCapabilitySchemaResponse,
    PbmCreateRequestType,
    PbmCreateResponse,
    PbmUpdateRequestType,
    PbmUpdateResponse,
    PbmDeleteRequestType,
    PbmDeleteResponse,
    PbmQueryProfileRequestType,
    PbmQueryProfileResponse,
    PbmRetrieveContentRequestType,
    PbmRetrieveContentResponse,
    PbmQueryAssociatedProfilesRequestType,
    PbmQueryAssociatedProfilesResponse,
    PbmQueryAssociatedProfileRequestType,
    PbmQueryAssociatedProfileResponse,
    PbmQueryAssociatedEntityRequestType,
    PbmQueryAssociatedEntityResponse,
    PbmQueryAssociatedEntitiesRequestType,
    PbmQueryAssociatedEntitiesResponse,
    PbmQueryDefaultRequirementProfileRequestType,
    PbmQueryDefaultRequirementProfileResponse,
    PbmResetDefaultRequirementProfileRequestType,
    PbmResetDefaultRequirementProfileResponse,
    PbmAssignDefaultRequirementProfileRequestType,
    PbmAssignDefaultRequirementProfileResponse,
    PbmFindApplicableDefaultProfileRequestType,
    PbmFindApplicableDefaultProfileResponse,
    PbmQueryDefaultRequirementProfilesRequestType,
    PbmQueryDefaultRequirementProfilesResponse,
    PbmResetVSanDefaultProfileRequestType,
    PbmResetVSanDefaultProfileResponse,
    PbmQuerySpaceStatsForStorageContainerRequestType,
    PbmQuerySpaceStatsForStorageContainerResponse,
    PbmCheckComplianceRequestType,
    PbmCheckComplianceResponse,
    PbmFetchComplianceResultRequestType,
    PbmFetchComplianceResultResponse,
    PbmCheckRollupComplianceRequestType,
    PbmCheckRollupComplianceResponse,
    PbmFetchRollupComplianceResultRequestType,
    PbmFetchRollupComplianceResultResponse,
    PbmQueryByRollupComplianceStatusRequestType,
    PbmQueryByRollupComplianceStatusResponse,
    PbmCheckCompatibilityRequestType,
    PbmCheckCompatibilityResponse,
    PbmCheckCompatibilityWithSpecRequestType,
    PbmCheckCompatibilityWithSpecResponse,
    PbmCheckRequirementsRequestType,
    PbmCheckRequirementsResponse,
    PbmQueryMatchingHubRequestType,
    PbmQueryMatchingHubResponse,
    PbmQueryMatchingHubWithSpecRequestType,
    PbmQueryMatchingHubWithSpecResponse,
    PbmQueryReplicationGroupsRequestType,
    PbmQueryReplicationGroupsResponse,
];

static ENUMS: &[EnumEntry] = enum_entries![
    PbmAssociateAndApplyPolicyStatusPolicyStatus,
    PbmBuiltinGenericType,
    PbmBuiltinType,
    PbmCapabilityOperator,
    PbmCapabilityTimeUnitType,
    PbmComplianceResultComplianceTaskStatus,
    PbmComplianceStatus,
    PbmDebugManagerKeystoreName,
    PbmHealthStatusForEntity,
    PbmIofilterInfoFilterType,
    PbmLineOfServiceInfoLineOfServiceEnum,
    PbmLoggingConfigurationComponent,
    PbmLoggingConfigurationLogLevel,
    PbmObjectType,
    PbmOperation,
    PbmPolicyAssociationVolumeAllocationType,
    PbmProfileCategoryEnum,
    PbmProfileResourceTypeEnum,
    PbmSystemCreatedProfileType,
    PbmVmOperation,
    PbmVvolType,
];

/// Every registered complex type
pub fn types() -> &'static [TypeEntry] {
    TYPES
}

/// Every registered enumeration
pub fn enums() -> &'static [EnumEntry] {
    ENUMS
}

/// Names of the registered complex types
pub fn type_names() -> Vec<&'static str> {
    TYPES.iter().map(|entry| entry.name).collect()
}

/// Names of the registered enumerations
pub fn enum_names() -> Vec<&'static str> {
    ENUMS.iter().map(|entry| entry.name).collect()
}

/// Look up a complex type
pub fn find_type(name: &str) -> Result<&'static TypeEntry> {
    TYPES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| Error::UnknownType {
            expected: "a registered type",
            found: name.to_string(),
        })
}

/// Look up an enumeration
pub fn find_enum(name: &str) -> Result<&'static EnumEntry> {
    ENUMS
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| Error::UnknownType {
            expected: "a registered enumeration",
            found: name.to_string(),
        })
}

/// Wire tokens of the enumeration `name`, in schema order
pub fn enum_values(name: &str) -> Result<Vec<&'static str>> {
    find_enum(name).map(|entry| (entry.values)())
}

/// Check that `value` is a token of the enumeration `name`
pub fn check_enum(name: &str, value: &str) -> Result<()> {
    let entry = find_enum(name)?;
    (entry.check)(value)
}

/// Decode `xml` as the type `type_name` and render it as JSON
pub fn decode_to_json(type_name: &str, xml: &str, limits: &Limits) -> Result<Value> {
    let entry = find_type(type_name)?;
    let document = Document::parse(xml, limits)?;
    tracing::debug!(
        type_name,
        root = document.root.local_name(),
        "decoding document through the registry"
    );
    (entry.decode)(&document.root)
}

/// Build a value of type `type_name` from JSON and encode it as XML under
/// the root element `root` (the type name when `None`)
pub fn encode_from_json(
    type_name: &str,
    json: Value,
    root: Option<&str>,
    options: &EncodeOptions,
) -> Result<String> {
    let entry = find_type(type_name)?;
    (entry.encode)(json, root.unwrap_or(entry.name), options)
}

/// JSON skeleton of type `type_name`, a starting point for
/// [`encode_from_json`]
pub fn template_json(type_name: &str) -> Result<Value> {
    find_type(type_name)?.template()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_are_unique() {
        let mut names = type_names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(enum_names().len(), 21);
    }

    #[test]
    fn test_families_registered_under_base_name() {
        assert!(type_names().contains(&"PbmProfile"));
        assert!(type_names().contains(&"MethodFault"));
        assert!(type_names().contains(&"PbmCapabilityConstraints"));
    }

    #[test]
    fn test_enum_lookup() {
        assert_eq!(
            enum_values("PbmVvolType").unwrap(),
            vec!["Config", "Data", "Swap"]
        );
        assert!(check_enum("PbmObjectType", "virtualDiskUUID").is_ok());
        assert!(matches!(
            check_enum("PbmObjectType", "virtualDiskUuid"),
            Err(Error::UnknownEnumValue { .. })
        ));
        assert!(matches!(
            enum_values("PbmColour"),
            Err(Error::UnknownType { .. })
        ));
    }

    #[test]
    fn test_json_bridge() {
        let xml = encode_from_json(
            "PbmPlacementHub",
            json!({ "hubType": "Datastore", "hubId": "datastore-5" }),
            Some("hub"),
            &EncodeOptions::compact(),
        )
        .unwrap();
        assert!(xml.starts_with("<hub "));
        assert!(xml.contains("<hubId>datastore-5</hubId>"));

        let value = decode_to_json("PbmPlacementHub", &xml, &Limits::default()).unwrap();
        assert_eq!(value, json!({ "hubType": "Datastore", "hubId": "datastore-5" }));
    }

    #[test]
    fn test_non_finite_double_through_json() {
        let xml = r#"<value xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xsi:type="xsd:double">INF</value>"#;

        let value = decode_to_json("anyType", xml, &Limits::default()).unwrap();
        assert_eq!(value, json!({ "double": "INF" }));

        let back = encode_from_json("anyType", value, Some("value"), &EncodeOptions::compact())
            .unwrap();
        assert!(back.contains("xsi:type=\"xsd:double\""));
        assert!(back.ends_with(">INF</value>"));
    }

    #[test]
    fn test_template_of_family_names_base() {
        let template = template_json("PbmProfile").unwrap();
        assert!(template["PbmProfile"].is_object());
        assert_eq!(template["PbmProfile"]["name"], "");
        assert!(matches!(
            template_json("PbmNothing"),
            Err(Error::UnknownType { .. })
        ));
    }

    #[test]
    fn test_unknown_type_name() {
        let err = decode_to_json("PbmNothing", "<x/>", &Limits::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownType { .. }));
    }
}
