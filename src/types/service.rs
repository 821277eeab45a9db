//! Service instance, object references and logging configuration

use crate::enums::{PbmLoggingConfigurationComponent, PbmLoggingConfigurationLogLevel, PbmObjectType};
use crate::error::Result;
use crate::vim::{KeyAnyValue, ManagedObjectReference};

pbm_type! {
    /// Product information of the PBM server
    PbmAboutInfo {
        /// Product name
        name: req String => "name",
        /// Product version
        version: req String => "version",
        /// Unique identifier of this server instance
        instance_uuid: req String => "instanceUuid",
    }
}

pbm_type! {
    /// References to the managers a PBM session works with
    PbmServiceInstanceContent {
        /// Server product information
        about_info: req PbmAboutInfo => "aboutInfo",
        /// Session manager
        session_manager: req ManagedObjectReference => "sessionManager",
        /// Capability metadata manager
        capability_metadata_manager: req ManagedObjectReference => "capabilityMetadataManager",
        /// Profile manager
        profile_manager: req ManagedObjectReference => "profileManager",
        /// Compliance manager
        compliance_manager: req ManagedObjectReference => "complianceManager",
        /// Placement solver
        placement_solver: req ManagedObjectReference => "placementSolver",
        /// Replication manager, absent on older servers
        replication_manager: opt ManagedObjectReference => "replicationManager",
    }
}

pbm_type! {
    /// Reference to a virtual machine, disk, datastore or other server object
    PbmServerObjectRef {
        /// Kind of object, a `PbmObjectType` token
        object_type: req String => "objectType",
        /// Object key (managed object id, disk id, UUID)
        key: req String => "key",
        /// vCenter instance that owns the object
        server_uuid: opt String => "serverUuid",
    }
}

impl PbmServerObjectRef {
    /// Create a reference to an object of a known kind
    pub fn new(object_type: PbmObjectType, key: impl Into<String>) -> Self {
        Self {
            object_type: object_type.value().to_string(),
            key: key.into(),
            server_uuid: None,
        }
    }

    /// Set the owning server
    pub fn with_server_uuid(mut self, server_uuid: impl Into<String>) -> Self {
        self.server_uuid = Some(server_uuid.into());
        self
    }

    /// Parse [`Self::object_type`]
    pub fn kind(&self) -> Result<PbmObjectType> {
        PbmObjectType::from_value(&self.object_type)
    }
}

pbm_type! {
    /// Localizable description of a schema element
    PbmExtendedElementDescription {
        /// Display label
        label: req String => "label",
        /// Summary text
        summary: req String => "summary",
        /// Key of the described element
        key: req String => "key",
        /// Prefix of the message catalog keys
        message_catalog_key_prefix: req String => "messageCatalogKeyPrefix",
        /// Substitution arguments
        message_arg: vec KeyAnyValue => "messageArg",
    }
}

pbm_type! {
    /// Log level of one server component
    PbmLoggingConfiguration {
        /// A `PbmLoggingConfigurationComponent` token
        component: req String => "component",
        /// A `PbmLoggingConfigurationLogLevel` token
        log_level: req String => "logLevel",
    }
}

impl PbmLoggingConfiguration {
    /// Create a configuration entry
    pub fn new(
        component: PbmLoggingConfigurationComponent,
        log_level: PbmLoggingConfigurationLogLevel,
    ) -> Self {
        Self {
            component: component.value().to_string(),
            log_level: log_level.value().to_string(),
        }
    }

    /// Parse [`Self::component`]
    pub fn component_kind(&self) -> Result<PbmLoggingConfigurationComponent> {
        PbmLoggingConfigurationComponent::from_value(&self.component)
    }

    /// Parse [`Self::log_level`]
    pub fn level(&self) -> Result<PbmLoggingConfigurationLogLevel> {
        PbmLoggingConfigurationLogLevel::from_value(&self.log_level)
    }
}
