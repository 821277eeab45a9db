//! Request and response bodies of the PBM operations
//!
//! Operations follow the document/literal convention: the request element is
//! named after the operation (`<PbmCreate>`) and carries the target managed
//! object as `_this` followed by the parameters; the response element is
//! `<PbmCreateResponse>` with the result in `returnval`. Only the bodies are
//! modelled here, not the envelope or the transport.

use crate::codec::{from_element, to_xml_string, EncodeOptions, FromXml, ToXml, XmlType};
use crate::documents::Document;
use crate::error::{DecodeError, Error, Result};
use crate::faults::FaultException;
use crate::limits::Limits;
use crate::types::capability::{
    PbmCapabilityMetadataPerCategory, PbmCapabilitySchema, PbmCapabilityVendorResourceTypeInfo,
};
use crate::types::compliance::{PbmComplianceResult, PbmRollupComplianceResult};
use crate::types::placement::{AnyPlacementRequirement, PbmPlacementCompatibilityResult, PbmPlacementHub};
use crate::types::profile::{
    AnyProfile, PbmCapabilityProfileCreateSpec, PbmCapabilityProfileUpdateSpec,
    PbmDatastoreSpaceStatistics, PbmDefaultProfileInfo, PbmProfileId, PbmProfileOperationOutcome,
    PbmProfileResourceType, PbmQueryProfileResult, PbmQueryReplicationGroupResult,
};
use crate::types::service::{PbmServerObjectRef, PbmServiceInstanceContent};
use crate::vim::ManagedObjectReference;

/// A PBM operation, implemented by its request body
pub trait Operation: ToXml + FromXml + XmlType {
    /// Operation name, which is also the request element name
    const NAME: &'static str;

    /// Response body type
    type Response: ToXml + FromXml + XmlType;

    /// Managed object the operation is invoked on
    fn target(&self) -> &ManagedObjectReference;

    /// Encode the request element
    fn to_request_xml(&self, options: &EncodeOptions) -> Result<String> {
        to_xml_string(Self::NAME, self, options)
    }

    /// Decode the response element.
    ///
    /// A fault detail element (`<NotFoundFault>`) in place of the response
    /// is returned as [`Error::Fault`].
    fn parse_response(xml: &str, limits: &Limits) -> Result<Self::Response> {
        let document = Document::parse(xml, limits)?;
        let root = &document.root;

        if root.local_name() == <Self::Response as XmlType>::TYPE_NAME {
            return from_element(root);
        }
        if root.local_name().ends_with("Fault") {
            return Err(FaultException::from_detail_element(root)?.into());
        }
        Err(Error::Decode(
            DecodeError::new(format!(
                "expected '{}', found '{}'",
                <Self::Response as XmlType>::TYPE_NAME,
                root.local_name()
            ))
            .with_type_name(<Self::Response as XmlType>::TYPE_NAME),
        ))
    }
}

/// Response body of one operation; `void` operations return an empty body
macro_rules! pbm_response {
    ($name:ident void) => {
        pbm_type! {
            /// Empty response body
            $name {}
        }
    };
    ($name:ident $kind:ident $ty:ty) => {
        pbm_type! {
            /// Response body
            $name {
                /// Result of the operation
                returnval: $kind $ty => "returnval",
            }
        }
    };
}

/// Declare the request body, response body and [`Operation`] impl of one
/// operation
macro_rules! pbm_operation {
    (
        $(#[$meta:meta])*
        $op:literal: $request:ident -> $response:ident ($($ret:tt)+) {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $kind:ident $ty:ty => $xml:literal
            ),* $(,)?
        }
    ) => {
        pbm_type! {
            $(#[$meta])*
            $request {
                /// Managed object the operation is invoked on
                this: req ManagedObjectReference => "_this",
                $(
                    $(#[$fmeta])*
                    $field: $kind $ty => $xml,
                )*
            }
        }

        pbm_response!($response $($ret)+);

        impl Operation for $request {
            const NAME: &'static str = $op;
            type Response = $response;

            fn target(&self) -> &ManagedObjectReference {
                &self.this
            }
        }
    };
}

pbm_operation! {
    /// Retrieve the service instance content
    "PbmRetrieveServiceContent": PbmRetrieveServiceContentRequestType
        -> PbmRetrieveServiceContentResponse (req PbmServiceInstanceContent) {}
}

pbm_operation! {
    /// List the profile resource types
    "PbmFetchResourceType": PbmFetchResourceTypeRequestType
        -> PbmFetchResourceTypeResponse (vec PbmProfileResourceType) {}
}

pbm_operation! {
    /// List vendors and namespaces per resource type
    "PbmFetchVendorInfo": PbmFetchVendorInfoRequestType
        -> PbmFetchVendorInfoResponse (vec PbmCapabilityVendorResourceTypeInfo) {
        /// Restrict to one resource type
        resource_type: opt PbmProfileResourceType => "resourceType",
    }
}

pbm_operation! {
    /// Fetch capability metadata
    "PbmFetchCapabilityMetadata": PbmFetchCapabilityMetadataRequestType
        -> PbmFetchCapabilityMetadataResponse (vec PbmCapabilityMetadataPerCategory) {
        /// Restrict to one resource type
        resource_type: opt PbmProfileResourceType => "resourceType",
        /// Restrict to one vendor
        vendor_uuid: opt String => "vendorUuid",
    }
}

pbm_operation! {
    /// Fetch capability schemas
    "PbmFetchCapabilitySchema": PbmFetchCapabilitySchemaRequestType
        -> PbmFetchCapabilitySchemaResponse (vec PbmCapabilitySchema) {
        /// Restrict to one vendor
        vendor_uuid: opt String => "vendorUuid",
        /// Restrict to lines of service
        line_of_service: vec String => "lineOfService",
    }
}

pbm_operation! {
    /// Create a capability profile
    "PbmCreate": PbmCreateRequestType -> PbmCreateResponse (req PbmProfileId) {
        /// The new profile
        create_spec: req PbmCapabilityProfileCreateSpec => "createSpec",
    }
}

pbm_operation! {
    /// Update a capability profile
    "PbmUpdate": PbmUpdateRequestType -> PbmUpdateResponse (void) {
        /// Profile to update
        profile_id: req PbmProfileId => "profileId",
        /// Changes
        update_spec: req PbmCapabilityProfileUpdateSpec => "updateSpec",
    }
}

pbm_operation! {
    /// Delete profiles
    "PbmDelete": PbmDeleteRequestType -> PbmDeleteResponse (vec PbmProfileOperationOutcome) {
        /// Profiles to delete
        profile_id: vec PbmProfileId => "profileId",
    }
}

pbm_operation! {
    /// List profiles of a resource type
    "PbmQueryProfile": PbmQueryProfileRequestType -> PbmQueryProfileResponse (vec PbmProfileId) {
        /// Resource type
        resource_type: req PbmProfileResourceType => "resourceType",
        /// Restrict to a `PbmProfileCategoryEnum` token
        profile_category: opt String => "profileCategory",
    }
}

pbm_operation! {
    /// Retrieve profile contents
    "PbmRetrieveContent": PbmRetrieveContentRequestType -> PbmRetrieveContentResponse (vec AnyProfile) {
        /// Profiles to retrieve
        profile_ids: vec PbmProfileId => "profileIds",
    }
}

pbm_operation! {
    /// Profiles associated with several entities
    "PbmQueryAssociatedProfiles": PbmQueryAssociatedProfilesRequestType
        -> PbmQueryAssociatedProfilesResponse (vec PbmQueryProfileResult) {
        /// Entities
        entities: vec PbmServerObjectRef => "entities",
    }
}

pbm_operation! {
    /// Profiles associated with one entity
    "PbmQueryAssociatedProfile": PbmQueryAssociatedProfileRequestType
        -> PbmQueryAssociatedProfileResponse (vec PbmProfileId) {
        /// Entity
        entity: req PbmServerObjectRef => "entity",
    }
}

pbm_operation! {
    /// Entities associated with one profile
    "PbmQueryAssociatedEntity": PbmQueryAssociatedEntityRequestType
        -> PbmQueryAssociatedEntityResponse (vec PbmServerObjectRef) {
        /// Profile
        profile: req PbmProfileId => "profile",
        /// Restrict to a `PbmObjectType` token
        entity_type: opt String => "entityType",
    }
}

pbm_operation! {
    /// Entities associated with several profiles
    "PbmQueryAssociatedEntities": PbmQueryAssociatedEntitiesRequestType
        -> PbmQueryAssociatedEntitiesResponse (vec PbmQueryProfileResult) {
        /// Profiles
        profiles: vec PbmProfileId => "profiles",
    }
}

pbm_operation! {
    /// Default requirement profile of a datastore
    "PbmQueryDefaultRequirementProfile": PbmQueryDefaultRequirementProfileRequestType
        -> PbmQueryDefaultRequirementProfileResponse (opt PbmProfileId) {
        /// Datastore
        hub: req PbmPlacementHub => "hub",
    }
}

pbm_operation! {
    /// Reset the default requirement profile
    "PbmResetDefaultRequirementProfile": PbmResetDefaultRequirementProfileRequestType
        -> PbmResetDefaultRequirementProfileResponse (void) {
        /// Profile to reset
        profile: opt PbmProfileId => "profile",
    }
}

pbm_operation! {
    /// Make a profile the default of datastores
    "PbmAssignDefaultRequirementProfile": PbmAssignDefaultRequirementProfileRequestType
        -> PbmAssignDefaultRequirementProfileResponse (void) {
        /// Profile
        profile: req PbmProfileId => "profile",
        /// Datastores
        datastores: vec PbmPlacementHub => "datastores",
    }
}

pbm_operation! {
    /// Profiles that can be the default of datastores
    "PbmFindApplicableDefaultProfile": PbmFindApplicableDefaultProfileRequestType
        -> PbmFindApplicableDefaultProfileResponse (vec AnyProfile) {
        /// Datastores
        datastores: vec PbmPlacementHub => "datastores",
    }
}

pbm_operation! {
    /// Default profiles of datastores
    "PbmQueryDefaultRequirementProfiles": PbmQueryDefaultRequirementProfilesRequestType
        -> PbmQueryDefaultRequirementProfilesResponse (vec PbmDefaultProfileInfo) {
        /// Datastores
        datastores: vec PbmPlacementHub => "datastores",
    }
}

pbm_operation! {
    /// Restore the vSAN default profile
    "PbmResetVSanDefaultProfile": PbmResetVSanDefaultProfileRequestType
        -> PbmResetVSanDefaultProfileResponse (void) {}
}

pbm_operation! {
    /// Space statistics of a storage container
    "PbmQuerySpaceStatsForStorageContainer": PbmQuerySpaceStatsForStorageContainerRequestType
        -> PbmQuerySpaceStatsForStorageContainerResponse (vec PbmDatastoreSpaceStatistics) {
        /// Storage container
        datastore: req PbmServerObjectRef => "datastore",
        /// Restrict to profiles
        capability_profile_id: vec PbmProfileId => "capabilityProfileId",
    }
}

pbm_operation! {
    /// Run a compliance check
    "PbmCheckCompliance": PbmCheckComplianceRequestType
        -> PbmCheckComplianceResponse (vec PbmComplianceResult) {
        /// Entities to check
        entities: vec PbmServerObjectRef => "entities",
        /// Profile to check against instead of the associated one
        profile: opt PbmProfileId => "profile",
    }
}

pbm_operation! {
    /// Fetch stored compliance results
    "PbmFetchComplianceResult": PbmFetchComplianceResultRequestType
        -> PbmFetchComplianceResultResponse (vec PbmComplianceResult) {
        /// Entities
        entities: vec PbmServerObjectRef => "entities",
        /// Profile the results were computed against
        profile: opt PbmProfileId => "profile",
    }
}

pbm_operation! {
    /// Run a rollup compliance check
    "PbmCheckRollupCompliance": PbmCheckRollupComplianceRequestType
        -> PbmCheckRollupComplianceResponse (vec PbmRollupComplianceResult) {
        /// Virtual machines
        entity: vec PbmServerObjectRef => "entity",
    }
}

pbm_operation! {
    /// Fetch stored rollup compliance results
    "PbmFetchRollupComplianceResult": PbmFetchRollupComplianceResultRequestType
        -> PbmFetchRollupComplianceResultResponse (vec PbmRollupComplianceResult) {
        /// Virtual machines
        entity: vec PbmServerObjectRef => "entity",
    }
}

pbm_operation! {
    /// Entities whose rollup compliance has a given status
    "PbmQueryByRollupComplianceStatus": PbmQueryByRollupComplianceStatusRequestType
        -> PbmQueryByRollupComplianceStatusResponse (vec PbmServerObjectRef) {
        /// A `PbmComplianceStatus` token
        status: req String => "status",
    }
}

pbm_operation! {
    /// Hubs compatible with a stored profile
    "PbmCheckCompatibility": PbmCheckCompatibilityRequestType
        -> PbmCheckCompatibilityResponse (vec PbmPlacementCompatibilityResult) {
        /// Candidate hubs; all hubs when empty
        hubs_to_search: vec PbmPlacementHub => "hubsToSearch",
        /// Profile
        profile: req PbmProfileId => "profile",
    }
}

pbm_operation! {
    /// Hubs compatible with an unsaved profile
    "PbmCheckCompatibilityWithSpec": PbmCheckCompatibilityWithSpecRequestType
        -> PbmCheckCompatibilityWithSpecResponse (vec PbmPlacementCompatibilityResult) {
        /// Candidate hubs; all hubs when empty
        hubs_to_search: vec PbmPlacementHub => "hubsToSearch",
        /// Profile spec
        profile: req PbmCapabilityProfileCreateSpec => "profile",
    }
}

pbm_operation! {
    /// Hubs that satisfy placement requirements
    "PbmCheckRequirements": PbmCheckRequirementsRequestType
        -> PbmCheckRequirementsResponse (vec PbmPlacementCompatibilityResult) {
        /// Candidate hubs; all hubs when empty
        hubs_to_search: vec PbmPlacementHub => "hubsToSearch",
        /// Object being placed
        placement_subject_ref: opt PbmServerObjectRef => "placementSubjectRef",
        /// Requirements
        placement_subject_requirement: vec AnyPlacementRequirement => "placementSubjectRequirement",
    }
}

pbm_operation! {
    /// Hubs matching a stored profile
    "PbmQueryMatchingHub": PbmQueryMatchingHubRequestType
        -> PbmQueryMatchingHubResponse (vec PbmPlacementHub) {
        /// Candidate hubs; all hubs when empty
        hubs_to_search: vec PbmPlacementHub => "hubsToSearch",
        /// Profile
        profile: req PbmProfileId => "profile",
    }
}

pbm_operation! {
    /// Hubs matching an unsaved profile
    "PbmQueryMatchingHubWithSpec": PbmQueryMatchingHubWithSpecRequestType
        -> PbmQueryMatchingHubWithSpecResponse (vec PbmPlacementHub) {
        /// Candidate hubs; all hubs when empty
        hubs_to_search: vec PbmPlacementHub => "hubsToSearch",
        /// Profile spec
        create_spec: req PbmCapabilityProfileCreateSpec => "createSpec",
    }
}

pbm_operation! {
    /// Replication groups of entities
    "PbmQueryReplicationGroups": PbmQueryReplicationGroupsRequestType
        -> PbmQueryReplicationGroupsResponse (vec PbmQueryReplicationGroupResult) {
        /// Entities
        entities: vec PbmServerObjectRef => "entities",
    }
}

impl PbmRetrieveServiceContentRequestType {
    /// Request against the well-known service instance
    pub fn new() -> Self {
        Self {
            this: ManagedObjectReference::service_instance(),
        }
    }
}
