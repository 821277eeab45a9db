//! PBM enumerations
//!
//! Closed sets of string tokens. Each enumeration exposes `value()`,
//! `from_value()`, `ALL`, `Display`/`FromStr` and serde/XML codecs that use
//! the wire token. Tokens outside the declared set are rejected with
//! [`Error::UnknownEnumValue`](crate::error::Error::UnknownEnumValue).

use crate::codec::XmlType;
use crate::error::Result;

/// Operations shared by every enumeration, for code that is generic over them
pub trait PbmEnum: XmlType + Copy + Sized + 'static {
    /// Every declared constant, in schema order
    fn all() -> &'static [Self];

    /// Wire token of this constant
    fn value(&self) -> &'static str;

    /// Look up a constant by its wire token
    fn from_value(value: &str) -> Result<Self>;

    /// Wire tokens of every constant
    fn values() -> Vec<&'static str> {
        Self::all().iter().map(|c| c.value()).collect()
    }
}

pbm_enum! {
    /// Outcome of associating and applying a policy to an entity
    PbmAssociateAndApplyPolicyStatusPolicyStatus {
        /// Policy applied successfully
        Success => "success",
        /// Policy application failed
        Failed => "failed",
        /// Policy cannot be applied
        Invalid => "invalid",
    }
}

pbm_enum! {
    /// Generic data types a capability property can be built from
    PbmBuiltinGenericType {
        /// Range of values (`PbmCapabilityRange`)
        VmwRange => "VMW_RANGE",
        /// Discrete set of values (`PbmCapabilityDiscreteSet`)
        VmwSet => "VMW_SET",
    }
}

pbm_enum! {
    /// Scalar data types of capability properties
    PbmBuiltinType {
        /// `xsd:long`
        XsdLong => "XSD_LONG",
        /// `xsd:short`
        XsdShort => "XSD_SHORT",
        /// `xsd:integer`
        XsdInteger => "XSD_INTEGER",
        /// `xsd:int`
        XsdInt => "XSD_INT",
        /// `xsd:string`
        XsdString => "XSD_STRING",
        /// `xsd:boolean`
        XsdBoolean => "XSD_BOOLEAN",
        /// `xsd:double`
        XsdDouble => "XSD_DOUBLE",
        /// `xsd:dateTime`
        XsdDatetime => "XSD_DATETIME",
        /// `PbmCapabilityTimeSpan`
        VmwTimespan => "VMW_TIMESPAN",
        /// Reference to another policy
        VmwPolicy => "VMW_POLICY",
    }
}

pbm_enum! {
    /// Operator applied to a capability property value
    PbmCapabilityOperator {
        /// Negation
        Not => "NOT",
    }
}

pbm_enum! {
    /// Units of a `PbmCapabilityTimeSpan`
    PbmCapabilityTimeUnitType {
        /// Seconds
        Seconds => "SECONDS",
        /// Minutes
        Minutes => "MINUTES",
        /// Hours
        Hours => "HOURS",
        /// Days
        Days => "DAYS",
        /// Weeks
        Weeks => "WEEKS",
        /// Months
        Months => "MONTHS",
        /// Years
        Years => "YEARS",
    }
}

pbm_enum! {
    /// Progress of a compliance check task
    PbmComplianceResultComplianceTaskStatus {
        /// Check is running
        InProgress => "inProgress",
        /// Check finished
        Success => "success",
        /// Check failed
        Failed => "failed",
    }
}

pbm_enum! {
    /// Compliance state of an entity against its policy
    PbmComplianceStatus {
        /// Entity satisfies its policy
        Compliant => "compliant",
        /// Entity violates its policy
        NonCompliant => "nonCompliant",
        /// State cannot be determined
        Unknown => "unknown",
        /// No policy applies
        NotApplicable => "notApplicable",
        /// Result predates the current policy
        OutOfDate => "outOfDate",
    }
}

pbm_enum! {
    /// Keystores the debug manager can query
    PbmDebugManagerKeystoreName {
        /// Storage monitoring service keystore
        Sms => "SMS",
        /// Trusted root certificates
        TrustedRoots => "TRUSTED_ROOTS",
    }
}

pbm_enum! {
    /// Health of an entity
    PbmHealthStatusForEntity {
        /// Unhealthy
        Red => "red",
        /// Degraded
        Yellow => "yellow",
        /// Healthy
        Green => "green",
        /// Health unknown
        Unknown => "unknown",
    }
}

pbm_enum! {
    /// Categories of I/O filters
    PbmIofilterInfoFilterType {
        /// Inspection filter
        Inspection => "INSPECTION",
        /// Compression filter
        Compression => "COMPRESSION",
        /// Encryption filter
        Encryption => "ENCRYPTION",
        /// Replication filter
        Replication => "REPLICATION",
        /// Caching filter
        Cache => "CACHE",
        /// Data provider filter
        DataProvider => "DATAPROVIDER",
        /// Datastore I/O control filter
        DatastoreIoControl => "DATASTOREIOCONTROL",
    }
}

pbm_enum! {
    /// Lines of service a data service policy provides
    PbmLineOfServiceInfoLineOfServiceEnum {
        /// Inspection
        Inspection => "INSPECTION",
        /// Compression
        Compression => "COMPRESSION",
        /// Encryption
        Encryption => "ENCRYPTION",
        /// Replication
        Replication => "REPLICATION",
        /// Caching
        Caching => "CACHING",
        /// Persistence
        Persistence => "PERSISTENCE",
        /// Data provider
        DataProvider => "DATA_PROVIDER",
        /// Datastore I/O control
        DatastoreIoControl => "DATASTORE_IO_CONTROL",
        /// Data protection
        DataProtection => "DATA_PROTECTION",
    }
}

pbm_enum! {
    /// Components whose logging can be configured
    PbmLoggingConfigurationComponent {
        /// Policy service
        Pbm => "pbm",
        /// Storage lifecycle management
        Vslm => "vslm",
        /// Storage monitoring service
        Sms => "sms",
        /// Policy service core
        Spbm => "spbm",
        /// Storage policy service
        Sps => "sps",
        /// HTTP client headers
        HttpclientHeader => "httpclient_header",
        /// HTTP client bodies
        HttpclientContent => "httpclient_content",
        /// Managed object layer
        Vmomi => "vmomi",
    }
}

pbm_enum! {
    /// Log levels for `PbmLoggingConfiguration`
    PbmLoggingConfigurationLogLevel {
        /// Informational
        Info => "INFO",
        /// Debugging
        Debug => "DEBUG",
        /// Tracing
        Trace => "TRACE",
    }
}

pbm_enum! {
    /// Kinds of object a `PbmServerObjectRef` can point at
    PbmObjectType {
        /// Virtual machine home
        VirtualMachine => "virtualMachine",
        /// Virtual machine and all its disks
        VirtualMachineAndDisks => "virtualMachineAndDisks",
        /// Virtual disk by VM-relative id
        VirtualDiskId => "virtualDiskId",
        /// Virtual disk by UUID
        VirtualDiskUuid => "virtualDiskUUID",
        /// Datastore
        Datastore => "datastore",
        /// vSAN object
        VsanObjectId => "vsanObjectId",
        /// File share
        FileShareId => "fileShareId",
        /// Unknown object kind
        Unknown => "unknown",
    }
}

pbm_enum! {
    /// Provisioning operations a placement check may be run for
    PbmOperation {
        /// Create
        Create => "CREATE",
        /// Register
        Register => "REGISTER",
        /// Reconfigure
        Reconfigure => "RECONFIGURE",
        /// Migrate
        Migrate => "MIGRATE",
        /// Clone
        Clone => "CLONE",
    }
}

pbm_enum! {
    /// Volume allocation schemes of a policy association
    PbmPolicyAssociationVolumeAllocationType {
        /// Space allocated and zeroed up front
        FullyInitialized => "FullyInitialized",
        /// Space reserved up front
        ReserveSpace => "ReserveSpace",
        /// Space allocated on demand
        ConserveSpace => "ConserveSpace",
    }
}

pbm_enum! {
    /// Categories of profile
    PbmProfileCategoryEnum {
        /// Requirement profile (VM storage policy)
        Requirement => "REQUIREMENT",
        /// Resource profile
        Resource => "RESOURCE",
        /// Data service policy
        DataServicePolicy => "DATA_SERVICE_POLICY",
    }
}

pbm_enum! {
    /// Resource types a profile can apply to
    PbmProfileResourceTypeEnum {
        /// Storage
        Storage => "STORAGE",
    }
}

pbm_enum! {
    /// Profiles created by the system rather than a user
    PbmSystemCreatedProfileType {
        /// vSAN datastore default
        VsanDefaultProfile => "VsanDefaultProfile",
        /// Virtual Volumes datastore default
        VVolDefaultProfile => "VVolDefaultProfile",
        /// Persistent memory default
        PmemDefaultProfile => "PmemDefaultProfile",
        /// Management VM policy on VMware Cloud
        VmcManagementProfile => "VmcManagementProfile",
        /// vSAN Max datastore default
        VsanMaxDefaultProfile => "VsanMaxDefaultProfile",
    }
}

pbm_enum! {
    /// Virtual machine operations
    PbmVmOperation {
        /// Create
        Create => "CREATE",
        /// Reconfigure
        Reconfigure => "RECONFIGURE",
        /// Migrate
        Migrate => "MIGRATE",
        /// Clone
        Clone => "CLONE",
    }
}

pbm_enum! {
    /// Kinds of Virtual Volumes object
    PbmVvolType {
        /// Configuration volume
        Config => "Config",
        /// Data volume
        Data => "Data",
        /// Swap volume
        Swap => "Swap",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_value_differs_from_identifier() {
        assert_eq!(PbmBuiltinType::XsdDatetime.value(), "XSD_DATETIME");
        assert_eq!(PbmObjectType::VirtualDiskUuid.value(), "virtualDiskUUID");
        assert_eq!(
            PbmLoggingConfigurationComponent::HttpclientHeader.value(),
            "httpclient_header"
        );
    }

    #[test]
    fn test_from_value_round_trip() {
        for status in PbmComplianceStatus::ALL {
            assert_eq!(PbmComplianceStatus::from_value(status.value()).unwrap(), *status);
        }
    }

    #[test]
    fn test_unknown_token() {
        let err = PbmVvolType::from_value("config").unwrap_err();
        match err {
            Error::UnknownEnumValue { type_name, value } => {
                assert_eq!(type_name, "PbmVvolType");
                assert_eq!(value, "config");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_and_from_str() {
        let level: PbmLoggingConfigurationLogLevel = "DEBUG".parse().unwrap();
        assert_eq!(level, PbmLoggingConfigurationLogLevel::Debug);
        assert_eq!(level.to_string(), "DEBUG");
    }

    #[test]
    fn test_serde_uses_wire_token() {
        let json = serde_json::to_string(&PbmProfileCategoryEnum::DataServicePolicy).unwrap();
        assert_eq!(json, "\"DATA_SERVICE_POLICY\"");

        let parsed: PbmProfileCategoryEnum = serde_json::from_str("\"RESOURCE\"").unwrap();
        assert_eq!(parsed, PbmProfileCategoryEnum::Resource);
        assert!(serde_json::from_str::<PbmProfileCategoryEnum>("\"resource\"").is_err());
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let units: Vec<&str> = PbmCapabilityTimeUnitType::ALL.iter().map(|u| u.value()).collect();
        assert_eq!(
            units,
            vec!["SECONDS", "MINUTES", "HOURS", "DAYS", "WEEKS", "MONTHS", "YEARS"]
        );
    }
}
