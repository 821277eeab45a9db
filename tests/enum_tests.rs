//! Property tests for the closed enumerations

use proptest::prelude::*;

use pbm::codec::{from_xml, to_xml_string, EncodeOptions};
use pbm::enums::{PbmEnum, PbmObjectType, PbmProfileCategoryEnum, PbmVmOperation, PbmVvolType};
use pbm::registry;
use pbm::Error;

fn assert_tokens_round_trip<E: PbmEnum + std::fmt::Debug + PartialEq>() {
    for constant in E::all() {
        let token = constant.value();
        assert_eq!(E::from_value(token).unwrap(), *constant, "token {}", token);
    }
}

#[test]
fn test_every_registered_token_is_accepted() {
    for entry in registry::enums() {
        let tokens = registry::enum_values(entry.name).unwrap();
        assert!(!tokens.is_empty(), "{} has no tokens", entry.name);
        for token in tokens {
            registry::check_enum(entry.name, token).unwrap();
        }
    }
}

#[test]
fn test_typed_tokens_round_trip() {
    assert_tokens_round_trip::<PbmObjectType>();
    assert_tokens_round_trip::<PbmProfileCategoryEnum>();
    assert_tokens_round_trip::<PbmVmOperation>();
    assert_tokens_round_trip::<PbmVvolType>();
}

#[test]
fn test_tokens_are_unique_per_enumeration() {
    for entry in registry::enums() {
        let mut tokens = registry::enum_values(entry.name).unwrap();
        let count = tokens.len();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), count, "{} repeats a token", entry.name);
    }
}

#[test]
fn test_enum_as_element_text() {
    let xml = to_xml_string("vvolType", &PbmVvolType::Swap, &EncodeOptions::compact()).unwrap();
    assert!(xml.contains(">Swap</vvolType>"));

    let back: PbmVvolType = from_xml(&xml).unwrap();
    assert_eq!(back, PbmVvolType::Swap);
}

proptest! {
    #[test]
    fn prop_unknown_tokens_are_rejected(token in "[A-Za-z_]{1,24}") {
        for entry in registry::enums() {
            let known = registry::enum_values(entry.name).unwrap();
            prop_assume!(!known.contains(&token.as_str()));

            match registry::check_enum(entry.name, &token) {
                Err(Error::UnknownEnumValue { type_name, value }) => {
                    prop_assert_eq!(type_name, entry.name);
                    prop_assert_eq!(value, token.clone());
                }
                other => prop_assert!(false, "unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn prop_object_type_lookup_is_case_sensitive(index in 0usize..PbmObjectType::ALL.len()) {
        let constant = PbmObjectType::ALL[index];
        let shouted = constant.value().to_uppercase();
        prop_assume!(shouted != constant.value());
        prop_assert!(PbmObjectType::from_value(&shouted).is_err());
    }

    #[test]
    fn prop_serde_uses_wire_tokens(index in 0usize..PbmVmOperation::ALL.len()) {
        let constant = PbmVmOperation::ALL[index];
        let json = serde_json::to_string(&constant).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", constant.value()));

        let back: PbmVmOperation = serde_json::from_str(&format!("\"{}\"", constant.value())).unwrap();
        prop_assert_eq!(back, constant);
    }
}
