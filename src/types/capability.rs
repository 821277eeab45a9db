//! Capability metadata, constraints and schemas
//!
//! A requirement profile is a tree: constraints hold sub-profiles, which hold
//! capability instances, whose constraint instances hold property values.
//! Metadata types describe what a capability's properties look like.

use crate::enums::{
    PbmBuiltinGenericType, PbmBuiltinType, PbmCapabilityOperator, PbmCapabilityTimeUnitType,
    PbmLineOfServiceInfoLineOfServiceEnum,
};
use crate::error::Result;
use crate::types::service::PbmExtendedElementDescription;
use crate::value::AnyValue;

pbm_type! {
    /// Identifies a capability within a vendor namespace
    PbmCapabilityMetadataUniqueId {
        /// Vendor namespace
        namespace: req String => "namespace",
        /// Capability id within the namespace
        id: req String => "id",
    }
}

impl PbmCapabilityMetadataUniqueId {
    /// Create an identifier
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }
}

pbm_type! {
    /// Value assigned to one capability property
    PbmCapabilityPropertyInstance {
        /// Property id from the capability metadata
        id: req String => "id",
        /// A `PbmCapabilityOperator` token applied to the value
        operator: opt String => "operator",
        /// The value, typed by `xsi:type`
        value: req AnyValue => "value",
    }
}

impl PbmCapabilityPropertyInstance {
    /// Create a property instance without operator
    pub fn new(id: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        Self {
            id: id.into(),
            operator: None,
            value: value.into(),
        }
    }

    /// Parse [`Self::operator`]
    pub fn operator_kind(&self) -> Option<Result<PbmCapabilityOperator>> {
        self.operator.as_deref().map(PbmCapabilityOperator::from_value)
    }
}

pbm_type! {
    /// Conjunction of property values
    PbmCapabilityConstraintInstance {
        /// Property values; all must hold
        property_instance: vec PbmCapabilityPropertyInstance => "propertyInstance",
    }
}

pbm_type! {
    /// A capability with alternative constraint sets
    PbmCapabilityInstance {
        /// Capability identity
        id: req PbmCapabilityMetadataUniqueId => "id",
        /// Alternatives; any one may hold
        constraint: vec PbmCapabilityConstraintInstance => "constraint",
    }
}

pbm_type! {
    /// Named rule set of a capability profile
    PbmCapabilitySubProfile {
        /// Rule set name
        name: req String => "name",
        /// Capabilities the rule set requires
        capability: vec PbmCapabilityInstance => "capability",
        /// Provision even when the rule set cannot be satisfied
        force_provision: opt bool => "forceProvision",
    }
}

pbm_type! {
    /// Base of profile constraint types
    PbmCapabilityConstraints {}
}

pbm_type! {
    /// Constraints expressed as rule sets
    PbmCapabilitySubProfileConstraints: PbmCapabilityConstraints as base {
        /// Rule sets; any one may hold
        sub_profiles: vec PbmCapabilitySubProfile => "subProfiles",
    }
}

pbm_family! {
    /// A `PbmCapabilityConstraints` slot
    AnyCapabilityConstraints {
        /// Plain `PbmCapabilityConstraints`
        base Constraints(PbmCapabilityConstraints),
        /// Rule-set constraints
        SubProfile(PbmCapabilitySubProfileConstraints),
    }
}

pbm_type! {
    /// Closed interval of values
    PbmCapabilityRange {
        /// Lower bound
        min: req AnyValue => "min",
        /// Upper bound
        max: req AnyValue => "max",
    }
}

impl PbmCapabilityRange {
    /// Create a range
    pub fn new(min: impl Into<AnyValue>, max: impl Into<AnyValue>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

pbm_type! {
    /// Enumerated set of values
    PbmCapabilityDiscreteSet {
        /// Members
        values: vec AnyValue => "values",
    }
}

pbm_type! {
    /// Duration with a unit
    PbmCapabilityTimeSpan {
        /// Number of units
        value: req i32 => "value",
        /// A `PbmCapabilityTimeUnitType` token
        unit: req String => "unit",
    }
}

impl PbmCapabilityTimeSpan {
    /// Create a time span
    pub fn new(value: i32, unit: PbmCapabilityTimeUnitType) -> Self {
        Self {
            value,
            unit: unit.value().to_string(),
        }
    }

    /// Parse [`Self::unit`]
    pub fn time_unit(&self) -> Result<PbmCapabilityTimeUnitType> {
        PbmCapabilityTimeUnitType::from_value(&self.unit)
    }
}

pbm_type! {
    /// Value together with a localizable description
    PbmCapabilityDescription {
        /// Description of the value
        description: req PbmExtendedElementDescription => "description",
        /// The value
        value: req AnyValue => "value",
    }
}

pbm_type! {
    /// Data type of a capability property
    PbmCapabilityTypeInfo {
        /// A `PbmBuiltinType` token
        type_name: req String => "typeName",
    }
}

impl PbmCapabilityTypeInfo {
    /// Create type info for a built-in type
    pub fn new(builtin: PbmBuiltinType) -> Self {
        Self {
            type_name: builtin.value().to_string(),
        }
    }

    /// Parse [`Self::type_name`]
    pub fn builtin_type(&self) -> Result<PbmBuiltinType> {
        PbmBuiltinType::from_value(&self.type_name)
    }
}

pbm_type! {
    /// Data type built from a generic container over a built-in type
    PbmCapabilityGenericTypeInfo: PbmCapabilityTypeInfo as base {
        /// A `PbmBuiltinGenericType` token
        generic_type_name: req String => "genericTypeName",
    }
}

impl PbmCapabilityGenericTypeInfo {
    /// Parse [`Self::generic_type_name`]
    pub fn generic_type(&self) -> Result<PbmBuiltinGenericType> {
        PbmBuiltinGenericType::from_value(&self.generic_type_name)
    }
}

pbm_family! {
    /// A `PbmCapabilityTypeInfo` slot
    AnyCapabilityTypeInfo {
        /// Scalar type
        base Scalar(PbmCapabilityTypeInfo),
        /// Range or set of a scalar type
        Generic(PbmCapabilityGenericTypeInfo),
    }
}

pbm_type! {
    /// Describes one property of a capability
    PbmCapabilityPropertyMetadata {
        /// Property id
        id: req String => "id",
        /// Display information
        summary: req PbmExtendedElementDescription => "summary",
        /// Whether the property must be set
        mandatory: req bool => "mandatory",
        /// Data type of the value
        type_info: opt AnyCapabilityTypeInfo => "type",
        /// Default value
        default_value: opt AnyValue => "defaultValue",
        /// Allowed values (a range or set)
        allowed_value: opt AnyValue => "allowedValue",
        /// Hint for the editor that builds requirements
        requirements_type_hint: opt String => "requirementsTypeHint",
    }
}

pbm_type! {
    /// Describes one capability
    PbmCapabilityMetadata {
        /// Capability identity
        id: req PbmCapabilityMetadataUniqueId => "id",
        /// Display information
        summary: req PbmExtendedElementDescription => "summary",
        /// Whether every profile must use the capability
        mandatory: opt bool => "mandatory",
        /// Whether the capability is only a hint
        hint: opt bool => "hint",
        /// Property id that keys the capability
        key_id: opt String => "keyId",
        /// Whether several constraints are allowed
        allow_multiple_constraints: opt bool => "allowMultipleConstraints",
        /// The capability's properties
        property_metadata: vec PbmCapabilityPropertyMetadata => "propertyMetadata",
    }
}

pbm_type! {
    /// Capabilities grouped under a sub-category
    PbmCapabilityMetadataPerCategory {
        /// Sub-category name
        sub_category: req String => "subCategory",
        /// Capabilities in the sub-category
        capability_metadata: vec PbmCapabilityMetadata => "capabilityMetadata",
    }
}

pbm_type! {
    /// Capability namespace and its version
    PbmCapabilityNamespaceInfo {
        /// Namespace version
        version: req String => "version",
        /// Namespace name
        namespace: req String => "namespace",
        /// Display information
        info: opt PbmExtendedElementDescription => "info",
    }
}

pbm_type! {
    /// Vendor that published a capability schema
    PbmCapabilitySchemaVendorInfo {
        /// Vendor identifier
        vendor_uuid: req String => "vendorUuid",
        /// Display information
        info: req PbmExtendedElementDescription => "info",
    }
}

pbm_type! {
    /// Vendor and namespace pair
    PbmCapabilityVendorNamespaceInfo {
        /// Vendor
        vendor_info: req PbmCapabilitySchemaVendorInfo => "vendorInfo",
        /// Namespace
        namespace_info: req PbmCapabilityNamespaceInfo => "namespaceInfo",
    }
}

pbm_type! {
    /// Vendors and namespaces registered for a resource type
    PbmCapabilityVendorResourceTypeInfo {
        /// A `PbmProfileResourceTypeEnum` token
        resource_type: req String => "resourceType",
        /// Registered vendor namespaces
        vendor_namespace_info: vec PbmCapabilityVendorNamespaceInfo => "vendorNamespaceInfo",
    }
}

pbm_type! {
    /// Line of service offered by a data service
    PbmLineOfServiceInfo {
        /// A `PbmLineOfServiceInfoLineOfServiceEnum` token
        line_of_service: req String => "lineOfService",
        /// Display name
        name: req PbmExtendedElementDescription => "name",
        /// Display description
        description: opt PbmExtendedElementDescription => "description",
    }
}

impl PbmLineOfServiceInfo {
    /// Parse [`Self::line_of_service`]
    pub fn kind(&self) -> Result<PbmLineOfServiceInfoLineOfServiceEnum> {
        PbmLineOfServiceInfoLineOfServiceEnum::from_value(&self.line_of_service)
    }
}

pbm_type! {
    /// Persistence data service
    PbmPersistenceBasedDataServiceInfo: PbmLineOfServiceInfo as base {
        /// Persistence namespaces the service works with
        compatible_persistence_schema_namespace: vec String => "compatiblePersistenceSchemaNamespace",
    }
}

pbm_type! {
    /// I/O filter (VAIO) data service
    PbmVaioDataServiceInfo: PbmLineOfServiceInfo as base {}
}

pbm_family! {
    /// A `PbmLineOfServiceInfo` slot
    AnyLineOfServiceInfo {
        /// Plain line of service
        base LineOfService(PbmLineOfServiceInfo),
        /// Persistence service
        PersistenceBased(PbmPersistenceBasedDataServiceInfo),
        /// I/O filter service
        Vaio(PbmVaioDataServiceInfo),
    }
}

impl AnyLineOfServiceInfo {
    /// The common line-of-service fields
    pub fn info(&self) -> &PbmLineOfServiceInfo {
        match self {
            AnyLineOfServiceInfo::LineOfService(info) => info,
            AnyLineOfServiceInfo::PersistenceBased(info) => &info.base,
            AnyLineOfServiceInfo::Vaio(info) => &info.base,
        }
    }
}

pbm_type! {
    /// Capability schema published by one vendor
    PbmCapabilitySchema {
        /// Publishing vendor
        vendor_info: req PbmCapabilitySchemaVendorInfo => "vendorInfo",
        /// Schema namespace
        namespace_info: req PbmCapabilityNamespaceInfo => "namespaceInfo",
        /// Data service the schema belongs to
        line_of_service: opt AnyLineOfServiceInfo => "lineOfService",
        /// Capabilities by sub-category
        capability_metadata_per_category: vec PbmCapabilityMetadataPerCategory => "capabilityMetadataPerCategory",
    }
}
