//! Decode captured server responses, check their content, and encode them back

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use pbm::codec::{from_xml_str, to_xml_string, EncodeOptions};
use pbm::enums::{PbmProfileCategoryEnum, PbmSystemCreatedProfileType};
use pbm::faults::Fault;
use pbm::requests::{
    PbmCheckCompatibilityRequestType, PbmCheckCompatibilityResponse, PbmRetrieveContentRequestType,
    PbmRetrieveContentResponse,
};
use pbm::types::capability::AnyCapabilityConstraints;
use pbm::types::profile::AnyProfile;
use pbm::value::AnyValue;
use pbm::{Limits, Operation};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).unwrap()
}

fn retrieve_content() -> PbmRetrieveContentResponse {
    let xml = fixture("retrieve_content_response.xml");
    PbmRetrieveContentRequestType::parse_response(&xml, &Limits::default()).unwrap()
}

fn check_compatibility() -> PbmCheckCompatibilityResponse {
    let xml = fixture("check_compatibility_response.xml");
    PbmCheckCompatibilityRequestType::parse_response(&xml, &Limits::default()).unwrap()
}

#[test]
fn test_retrieve_content_profiles() {
    let response = retrieve_content();
    assert_eq!(response.returnval.len(), 2);

    let names: Vec<&str> = response
        .returnval
        .iter()
        .map(|profile| profile.profile().name.as_str())
        .collect();
    assert_eq!(names, vec!["vSAN Default Storage Policy", "VM Encryption Policy"]);
}

#[test]
fn test_retrieve_content_capability_profile_fields() {
    let response = retrieve_content();
    let vsan = match &response.returnval[0] {
        AnyProfile::Capability(profile) => profile,
        other => panic!("unexpected profile variant: {}", other.type_name()),
    };

    assert_eq!(vsan.base.profile_id.unique_id, "aa6d5a82-1c88-45da-85d3-3d74b91a5bad");
    assert_eq!(
        vsan.base.description.as_deref(),
        Some("Storage policy used as default for vSAN datastores")
    );
    assert_eq!(vsan.base.creation_time.timestamp_subsec_millis(), 512);
    assert_eq!(vsan.category().unwrap(), PbmProfileCategoryEnum::Requirement);
    assert_eq!(
        vsan.system_created().unwrap().unwrap(),
        PbmSystemCreatedProfileType::VsanDefaultProfile
    );
    assert_eq!(vsan.generation_id, Some(0));
    assert!(!vsan.is_default);

    let sub_profiles = match &vsan.constraints {
        AnyCapabilityConstraints::SubProfile(constraints) => &constraints.sub_profiles,
        other => panic!("unexpected constraints variant: {}", other.type_name()),
    };
    assert_eq!(sub_profiles.len(), 1);
    assert_eq!(sub_profiles[0].name, "VSAN");

    let capability_ids: Vec<&str> = sub_profiles[0]
        .capability
        .iter()
        .map(|capability| capability.id.id.as_str())
        .collect();
    assert_eq!(
        capability_ids,
        vec!["hostFailuresToTolerate", "stripeWidth", "forceProvisioning"]
    );

    let ftt = &sub_profiles[0].capability[0].constraint[0].property_instance[0];
    assert_eq!(ftt.value, AnyValue::Int(1));
    let force = &sub_profiles[0].capability[2].constraint[0].property_instance[0];
    assert_eq!(force.value, AnyValue::Boolean(false));
}

#[test]
fn test_retrieve_content_optional_fields_absent() {
    let response = retrieve_content();
    let encryption = response.returnval[1].capability_profile().unwrap();

    assert_eq!(encryption.base.description, None);
    assert_eq!(encryption.system_created_profile_type, None);
    assert!(encryption.system_created().is_none());
    assert_eq!(encryption.line_of_service, None);
}

#[test]
fn test_retrieve_content_reencodes() {
    let response = retrieve_content();

    let xml = to_xml_string(
        "PbmRetrieveContentResponse",
        &response,
        &EncodeOptions::default(),
    )
    .unwrap();
    assert!(xml.contains("xsi:type=\"PbmCapabilityProfile\""));
    assert!(xml.contains("xsi:type=\"PbmCapabilitySubProfileConstraints\""));
    assert!(xml.contains("xsi:type=\"xsd:int\""));

    let back: PbmRetrieveContentResponse = from_xml_str(&xml, &Limits::default()).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_retrieve_content_json_bridge() {
    let response = retrieve_content();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["returnval"][0]["PbmCapabilityProfile"]["profileCategory"], "REQUIREMENT");

    let back: PbmRetrieveContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_check_compatibility_results() {
    let response = check_compatibility();
    assert_eq!(response.returnval.len(), 2);

    let compatible = &response.returnval[0];
    assert_eq!(compatible.hub.hub_id, "datastore-11");
    assert!(compatible.is_compatible());

    let incompatible = &response.returnval[1];
    assert_eq!(incompatible.hub.hub_id, "datastore-14");
    assert!(!incompatible.is_compatible());
    assert_eq!(incompatible.error.len(), 1);
}

#[test]
fn test_check_compatibility_error_fault() {
    let response = check_compatibility();
    let error = &response.returnval[1].error[0];

    assert_eq!(
        error.localized_message.as_deref(),
        Some("Datastore does not match current VM policy")
    );
    assert!(error.fault.is_property_mismatch_fault());
    assert!(error.fault.is_compatibility_check_fault());
    assert!(error.fault.is_pbm_fault());
    assert_eq!(error.fault.hub().map(|hub| hub.hub_id.as_str()), Some("datastore-14"));

    match &error.fault {
        Fault::PbmPropertyMismatchFault(fault) => {
            assert_eq!(fault.capability_instance_id.namespace, "VSAN");
            assert_eq!(fault.requirement_property_instance.value, AnyValue::Int(2));
        }
        other => panic!("unexpected fault: {}", other.type_name()),
    }
}

#[test]
fn test_check_compatibility_reencodes() {
    let response = check_compatibility();

    let xml = to_xml_string(
        "PbmCheckCompatibilityResponse",
        &response,
        &EncodeOptions::compact(),
    )
    .unwrap();
    assert!(xml.contains("xsi:type=\"PbmPropertyMismatchFault\""));
    assert!(!xml.contains("<matchingResources"));

    let back: PbmCheckCompatibilityResponse = from_xml_str(&xml, &Limits::default()).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_wrong_response_root_is_rejected() {
    let xml = fixture("check_compatibility_response.xml");
    let err = PbmRetrieveContentRequestType::parse_response(&xml, &Limits::default()).unwrap_err();

    assert!(matches!(err, pbm::Error::Decode(_)));
    assert!(err.to_string().contains("PbmRetrieveContentResponse"));
}
