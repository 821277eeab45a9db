//! vim25 types referenced by the PBM schema
//!
//! PBM reuses a handful of core vSphere types: managed object references,
//! key/value pairs, localizable messages and replication group identifiers.
//! Fault payloads built on these live in [`crate::faults`].

use serde::{Deserialize, Serialize};

use crate::codec::{FromXml, ToXml, XmlType};
use crate::documents::Element;
use crate::error::{DecodeError, Result};
use crate::faults::Fault;
use crate::value::AnyValue;

/// Reference to a server-side managed object.
///
/// On the wire the object kind is the `type` attribute and the identifier is
/// the element text: `<_this type="PbmProfileProfileManager">ProfileManager</_this>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ManagedObjectReference {
    /// Managed object type (`PbmServiceInstance`, `PbmProfileProfileManager`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Server-assigned identifier
    pub value: String,
}

impl ManagedObjectReference {
    /// Create a reference
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// The well-known PBM service instance, entry point of every session
    pub fn service_instance() -> Self {
        Self::new("PbmServiceInstance", "ServiceInstance")
    }
}

impl XmlType for ManagedObjectReference {
    const TYPE_NAME: &'static str = "ManagedObjectReference";
}

impl ToXml for ManagedObjectReference {
    fn xml_attributes(&self) -> Vec<(&'static str, String)> {
        vec![("type", self.kind.clone())]
    }

    fn xml_text(&self) -> Option<String> {
        Some(self.value.clone())
    }
}

impl FromXml for ManagedObjectReference {
    fn from_xml(element: &Element) -> Result<Self> {
        let kind = element.attribute("type").ok_or_else(|| {
            DecodeError::new("managed object reference without 'type' attribute")
                .with_type_name(Self::TYPE_NAME)
        })?;
        Ok(Self::new(kind, element.text.as_str()))
    }
}

pbm_type! {
    /// Key with an arbitrary typed value
    KeyAnyValue {
        /// Key
        key: req String => "key",
        /// Value, typed by `xsi:type`
        value: req AnyValue => "value",
    }
}

pbm_type! {
    /// Message identified by a catalog key with substitution arguments
    LocalizableMessage {
        /// Catalog key
        key: req String => "key",
        /// Substitution arguments
        arg: vec KeyAnyValue => "arg",
        /// Message already rendered in the server locale
        message: opt String => "message",
    }
}

pbm_type! {
    /// A fault together with its rendered message
    LocalizedMethodFault {
        /// The fault payload, typed by `xsi:type`
        fault: req Fault => "fault",
        /// Message rendered in the session locale
        localized_message: opt String => "localizedMessage",
    }
}

pbm_type! {
    /// Identifier of a replication fault domain
    FaultDomainId {
        /// Identifier
        id: req String => "id",
    }
}

pbm_type! {
    /// Identifier of a device group within a fault domain
    DeviceGroupId {
        /// Identifier
        id: req String => "id",
    }
}

pbm_type! {
    /// Identifier of a replication group
    ReplicationGroupId {
        /// Fault domain the group belongs to
        fault_domain_id: req FaultDomainId => "faultDomainId",
        /// Device group within the fault domain
        device_group_id: req DeviceGroupId => "deviceGroupId",
    }
}

impl ReplicationGroupId {
    /// Create a replication group identifier
    pub fn new(fault_domain: impl Into<String>, device_group: impl Into<String>) -> Self {
        Self {
            fault_domain_id: FaultDomainId {
                id: fault_domain.into(),
            },
            device_group_id: DeviceGroupId {
                id: device_group.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_xml, to_xml_string, EncodeOptions};
    use crate::error::Error;

    #[test]
    fn test_moref_wire_form() {
        let moref = ManagedObjectReference::service_instance();
        let xml = to_xml_string("_this", &moref, &EncodeOptions::compact()).unwrap();

        assert!(xml.contains("type=\"PbmServiceInstance\""));
        assert!(xml.ends_with(">ServiceInstance</_this>"));
        assert_eq!(from_xml::<ManagedObjectReference>(&xml).unwrap(), moref);
    }

    #[test]
    fn test_moref_requires_type() {
        let err = from_xml::<ManagedObjectReference>("<_this>x</_this>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_moref_value_keeps_whitespace() {
        let moref = ManagedObjectReference::new("Datastore", " ds-1 ");
        let xml = to_xml_string("hub", &moref, &EncodeOptions::compact()).unwrap();
        assert!(xml.ends_with("> ds-1 </hub>"));

        let back: ManagedObjectReference = from_xml(&xml).unwrap();
        assert_eq!(back.value, " ds-1 ");
        assert_eq!(back, moref);
    }

    #[test]
    fn test_moref_json_uses_type_key() {
        let json = serde_json::to_value(ManagedObjectReference::new("Datastore", "ds-1")).unwrap();
        assert_eq!(json["type"], "Datastore");
        assert_eq!(json["value"], "ds-1");
    }

    #[test]
    fn test_localizable_message_defaults() {
        let msg = LocalizableMessage {
            key: "pbm.fault.x".into(),
            ..Default::default()
        };
        assert!(msg.arg.is_empty());
        assert_eq!(msg.message, None);
    }

    #[test]
    fn test_replication_group_id() {
        let id = ReplicationGroupId::new("fd-1", "dg-7");
        let xml = to_xml_string("groupId", &id, &EncodeOptions::compact()).unwrap();

        assert!(xml.contains("<faultDomainId><id>fd-1</id></faultDomainId>"));
        assert_eq!(from_xml::<ReplicationGroupId>(&xml).unwrap(), id);
    }
}
