//! Every registered type survives the JSON to XML to JSON bridge

use pretty_assertions::assert_eq;

use pbm::codec::EncodeOptions;
use pbm::registry;
use pbm::Limits;

#[test]
fn test_every_template_round_trips() {
    for entry in registry::types() {
        let template = entry.template().unwrap();

        let xml = registry::encode_from_json(
            entry.name,
            template.clone(),
            None,
            &EncodeOptions::compact(),
        )
        .unwrap_or_else(|e| panic!("encoding {}: {}", entry.name, e));

        let back = registry::decode_to_json(entry.name, &xml, &Limits::default())
            .unwrap_or_else(|e| panic!("decoding {}: {}\n{}", entry.name, e, xml));

        assert_eq!(back, template, "{} did not round-trip", entry.name);
    }
}

#[test]
fn test_every_template_is_named_like_its_entry() {
    for name in registry::type_names() {
        let template = registry::template_json(name).unwrap();
        assert!(template.is_object(), "{} template is not an object", name);
    }
}
