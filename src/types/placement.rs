//! Placement hubs, requirements and compatibility results

use crate::types::capability::AnyCapabilityConstraints;
use crate::types::profile::PbmProfileId;
use crate::types::service::PbmExtendedElementDescription;
use crate::vim::{LocalizedMethodFault, ReplicationGroupId};

pbm_type! {
    /// A datastore or storage pod that can hold virtual machine files
    PbmPlacementHub {
        /// Managed object type (`Datastore`, `StoragePod`)
        hub_type: req String => "hubType",
        /// Managed object id
        hub_id: req String => "hubId",
    }
}

impl PbmPlacementHub {
    /// Create a hub reference
    pub fn new(hub_type: impl Into<String>, hub_id: impl Into<String>) -> Self {
        Self {
            hub_type: hub_type.into(),
            hub_id: hub_id.into(),
        }
    }

    /// Hub for a datastore
    pub fn datastore(hub_id: impl Into<String>) -> Self {
        Self::new("Datastore", hub_id)
    }
}

pbm_type! {
    /// Base of placement requirement types
    PbmPlacementRequirement {}
}

pbm_type! {
    /// Placement must satisfy explicit constraints
    PbmPlacementCapabilityConstraintsRequirement: PbmPlacementRequirement as base {
        /// Required constraints
        constraints: req AnyCapabilityConstraints => "constraints",
    }
}

pbm_type! {
    /// Placement must satisfy a stored profile
    PbmPlacementCapabilityProfileRequirement: PbmPlacementRequirement as base {
        /// Required profile
        profile_id: req PbmProfileId => "profileId",
    }
}

pbm_family! {
    /// A `PbmPlacementRequirement` slot
    AnyPlacementRequirement {
        /// Plain requirement
        base Requirement(PbmPlacementRequirement),
        /// Constraints requirement
        Constraints(PbmPlacementCapabilityConstraintsRequirement),
        /// Profile requirement
        Profile(PbmPlacementCapabilityProfileRequirement),
    }
}

impl AnyPlacementRequirement {
    /// Requirement for the stored profile `profile_id`
    pub fn profile(profile_id: PbmProfileId) -> Self {
        PbmPlacementCapabilityProfileRequirement {
            profile_id,
            ..Default::default()
        }
        .into()
    }

    /// Requirement for explicit constraints
    pub fn constraints(constraints: AnyCapabilityConstraints) -> Self {
        PbmPlacementCapabilityConstraintsRequirement {
            constraints,
            ..Default::default()
        }
        .into()
    }
}

pbm_type! {
    /// Base of matching resource types
    PbmPlacementMatchingResources {}
}

pbm_type! {
    /// Replication groups that match a requirement
    PbmPlacementMatchingReplicationResources: PbmPlacementMatchingResources as base {
        /// Matching groups
        replication_group: vec ReplicationGroupId => "replicationGroup",
    }
}

pbm_family! {
    /// A `PbmPlacementMatchingResources` slot
    AnyPlacementMatchingResources {
        /// Plain matching resources
        base Resources(PbmPlacementMatchingResources),
        /// Replication groups
        Replication(PbmPlacementMatchingReplicationResources),
    }
}

pbm_type! {
    /// Resource consumption a placement would cause
    PbmPlacementResourceUtilization {
        /// Resource name
        name: req PbmExtendedElementDescription => "name",
        /// Resource description
        description: req PbmExtendedElementDescription => "description",
        /// Available before placement
        available_before: opt i64 => "availableBefore",
        /// Available after placement
        available_after: opt i64 => "availableAfter",
        /// Total capacity
        total: opt i64 => "total",
    }
}

pbm_type! {
    /// Compatibility of one hub with the requirements
    PbmPlacementCompatibilityResult {
        /// The hub
        hub: req PbmPlacementHub => "hub",
        /// Resources on the hub that match
        matching_resources: vec AnyPlacementMatchingResources => "matchingResources",
        /// How many objects fit
        how_many: opt i64 => "howMany",
        /// Resource consumption
        utilization: vec PbmPlacementResourceUtilization => "utilization",
        /// Warnings
        warning: vec LocalizedMethodFault => "warning",
        /// Reasons the hub is incompatible; empty when compatible
        error: vec LocalizedMethodFault => "error",
    }
}

impl PbmPlacementCompatibilityResult {
    /// Whether the hub satisfies the requirements
    pub fn is_compatible(&self) -> bool {
        self.error.is_empty()
    }
}
