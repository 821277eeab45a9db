//! Storage profiles and profile manager results

use chrono::{DateTime, Utc};

use crate::enums::{PbmProfileCategoryEnum, PbmProfileResourceTypeEnum, PbmSystemCreatedProfileType};
use crate::error::Result;
use crate::types::capability::AnyCapabilityConstraints;
use crate::types::placement::PbmPlacementHub;
use crate::types::service::PbmServerObjectRef;
use crate::vim::{LocalizedMethodFault, ReplicationGroupId};

pbm_type! {
    /// Unique identifier of a profile
    PbmProfileId {
        /// Server-assigned id
        unique_id: req String => "uniqueId",
    }
}

impl PbmProfileId {
    /// Create a profile id
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
        }
    }
}

pbm_type! {
    /// Profile type identifier
    PbmProfileType {
        /// Type id
        unique_id: req String => "uniqueId",
    }
}

pbm_type! {
    /// Resource type a profile applies to
    PbmProfileResourceType {
        /// A `PbmProfileResourceTypeEnum` token
        resource_type: req String => "resourceType",
    }
}

impl PbmProfileResourceType {
    /// The storage resource type, the only one servers define
    pub fn storage() -> Self {
        Self {
            resource_type: PbmProfileResourceTypeEnum::Storage.value().to_string(),
        }
    }

    /// Parse [`Self::resource_type`]
    pub fn kind(&self) -> Result<PbmProfileResourceTypeEnum> {
        PbmProfileResourceTypeEnum::from_value(&self.resource_type)
    }
}

pbm_type! {
    /// Common profile fields
    PbmProfile {
        /// Profile id
        profile_id: req PbmProfileId => "profileId",
        /// Display name
        name: req String => "name",
        /// Description
        description: opt String => "description",
        /// Creation time
        creation_time: req DateTime<Utc> => "creationTime",
        /// User that created the profile
        created_by: req String => "createdBy",
        /// Time of the last update
        last_updated_time: req DateTime<Utc> => "lastUpdatedTime",
        /// User that last updated the profile
        last_updated_by: req String => "lastUpdatedBy",
    }
}

pbm_type! {
    /// Profile defined by capability constraints
    PbmCapabilityProfile: PbmProfile as base {
        /// A `PbmProfileCategoryEnum` token
        profile_category: req String => "profileCategory",
        /// Resource type the profile applies to
        resource_type: req PbmProfileResourceType => "resourceType",
        /// The profile's constraints
        constraints: req AnyCapabilityConstraints => "constraints",
        /// Incremented on every update
        generation_id: opt i64 => "generationId",
        /// Deprecated, always false on current servers
        is_default: req bool => "isDefault",
        /// A `PbmSystemCreatedProfileType` token for system profiles
        system_created_profile_type: opt String => "systemCreatedProfileType",
        /// A `PbmLineOfServiceInfoLineOfServiceEnum` token for data service policies
        line_of_service: opt String => "lineOfService",
    }
}

impl PbmCapabilityProfile {
    /// Parse [`Self::profile_category`]
    pub fn category(&self) -> Result<PbmProfileCategoryEnum> {
        PbmProfileCategoryEnum::from_value(&self.profile_category)
    }

    /// Parse [`Self::system_created_profile_type`]
    pub fn system_created(&self) -> Option<Result<PbmSystemCreatedProfileType>> {
        self.system_created_profile_type
            .as_deref()
            .map(PbmSystemCreatedProfileType::from_value)
    }
}

pbm_type! {
    /// Default profile of a Virtual Volumes container
    PbmDefaultCapabilityProfile: PbmCapabilityProfile as base {
        /// `PbmVvolType` tokens the profile applies to
        vvol_type: vec String => "vvolType",
        /// Storage container id
        container_id: req String => "containerId",
    }
}

pbm_family! {
    /// A `PbmProfile` slot
    AnyProfile {
        /// Plain profile
        base Profile(PbmProfile),
        /// Capability profile
        Capability(PbmCapabilityProfile),
        /// Default profile of a storage container
        DefaultCapability(PbmDefaultCapabilityProfile),
    }
}

impl AnyProfile {
    /// The common profile fields
    pub fn profile(&self) -> &PbmProfile {
        match self {
            AnyProfile::Profile(profile) => profile,
            AnyProfile::Capability(profile) => &profile.base,
            AnyProfile::DefaultCapability(profile) => &profile.base.base,
        }
    }

    /// The capability profile fields, for capability profiles
    pub fn capability_profile(&self) -> Option<&PbmCapabilityProfile> {
        match self {
            AnyProfile::Profile(_) => None,
            AnyProfile::Capability(profile) => Some(profile),
            AnyProfile::DefaultCapability(profile) => Some(&profile.base),
        }
    }
}

pbm_type! {
    /// Parameters of a new capability profile
    PbmCapabilityProfileCreateSpec {
        /// Display name
        name: req String => "name",
        /// Description
        description: opt String => "description",
        /// A `PbmProfileCategoryEnum` token
        category: opt String => "category",
        /// Resource type
        resource_type: req PbmProfileResourceType => "resourceType",
        /// Constraints
        constraints: req AnyCapabilityConstraints => "constraints",
    }
}

impl PbmCapabilityProfileCreateSpec {
    /// Spec for a storage requirement profile
    pub fn requirement(name: impl Into<String>, constraints: AnyCapabilityConstraints) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: Some(PbmProfileCategoryEnum::Requirement.value().to_string()),
            resource_type: PbmProfileResourceType::storage(),
            constraints,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pbm_type! {
    /// Changes to an existing capability profile; unset fields stay as they are
    PbmCapabilityProfileUpdateSpec {
        /// New name
        name: opt String => "name",
        /// New description
        description: opt String => "description",
        /// New constraints
        constraints: opt AnyCapabilityConstraints => "constraints",
    }
}

pbm_type! {
    /// Result of a profile operation on one profile
    PbmProfileOperationOutcome {
        /// Profile the operation ran on
        profile_id: req PbmProfileId => "profileId",
        /// Failure, if the operation failed
        fault: opt LocalizedMethodFault => "fault",
    }
}

pbm_type! {
    /// Profiles associated with one entity
    PbmQueryProfileResult {
        /// The entity
        object: req PbmServerObjectRef => "object",
        /// Associated profiles
        profile_id: vec PbmProfileId => "profileId",
        /// Failure, if the query failed for this entity
        fault: opt LocalizedMethodFault => "fault",
    }
}

pbm_type! {
    /// Default profile of a set of datastores
    PbmDefaultProfileInfo {
        /// Datastores sharing the default
        datastores: vec PbmPlacementHub => "datastores",
        /// The default profile
        default_profile: opt AnyProfile => "defaultProfile",
        /// Failure, if the default could not be determined
        method_fault: opt LocalizedMethodFault => "methodFault",
    }
}

pbm_type! {
    /// Space usage of a storage container per profile
    PbmDatastoreSpaceStatistics {
        /// Profile the figures apply to; absent for the container total
        profile_id: opt String => "profileId",
        /// Physical capacity in MB
        physical_total_in_mb: req i64 => "physicalTotalInMB",
        /// Free physical space in MB
        physical_free_in_mb: req i64 => "physicalFreeInMB",
        /// Used physical space in MB
        physical_used_in_mb: req i64 => "physicalUsedInMB",
        /// Logical limit in MB
        logical_limit_in_mb: opt i64 => "logicalLimitInMB",
        /// Free logical space in MB
        logical_free_in_mb: req i64 => "logicalFreeInMB",
        /// Used logical space in MB
        logical_used_in_mb: req i64 => "logicalUsedInMB",
    }
}

pbm_type! {
    /// Replication group of one entity
    PbmQueryReplicationGroupResult {
        /// The entity
        object: req PbmServerObjectRef => "object",
        /// Its replication group
        replication_group_id: opt ReplicationGroupId => "replicationGroupId",
        /// Failure, if the query failed for this entity
        fault: opt LocalizedMethodFault => "fault",
    }
}
