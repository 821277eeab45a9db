//! Fault hierarchy
//!
//! Faults are ordinary schema types that servers return inside a SOAP fault
//! `detail`. Each concrete fault struct holds its base payload in a `base`
//! field, ending at [`MethodFault`], so the common `faultCause` and
//! `faultMessage` are reachable from any fault through [`AsMethodFault`].
//!
//! [`Fault`] is the polymorphic slot (one variant per type, discriminated by
//! `xsi:type`). Fault types are open-ended on the wire, so a type this crate
//! does not know decodes as [`Fault::Unrecognized`] instead of failing.
//! [`FaultException`] pairs a fault with its message and is the error value
//! callers propagate.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::codec::{to_xml_string, EncodeOptions, FromXml, ToXml, XmlType, XmlWriter};
use crate::documents::{Document, Element};
use crate::error::Result;
use crate::limits::Limits;
use crate::types::capability::{PbmCapabilityMetadataUniqueId, PbmCapabilityPropertyInstance};
use crate::types::placement::PbmPlacementHub;
use crate::types::profile::PbmProfileId;
use crate::vim::{LocalizableMessage, LocalizedMethodFault};

pbm_type! {
    /// Root of every fault type
    MethodFault {
        /// Fault that caused this one
        fault_cause: opt Box<LocalizedMethodFault> => "faultCause",
        /// Messages describing the fault
        fault_message: vec LocalizableMessage => "faultMessage",
    }
}

pbm_type! {
    /// Fault that any method may raise
    RuntimeFault: MethodFault as base {}
}

pbm_type! {
    /// Authorization failure
    SecurityError: RuntimeFault as base {}
}

pbm_type! {
    /// An argument was invalid
    InvalidArgument: RuntimeFault as base {
        /// Path of the offending property, if known
        invalid_property: opt String => "invalidProperty",
    }
}

pbm_type! {
    /// Root of faults a method declares
    VimFault: MethodFault as base {}
}

pbm_type! {
    /// Referenced object does not exist
    NotFound: VimFault as base {}
}

pbm_type! {
    /// Internal server failure
    SystemError: RuntimeFault as base {
        /// Failure description
        reason: req String => "reason",
    }
}

pbm_type! {
    /// Root of the PBM fault types
    PbmFault: MethodFault as base {}
}

pbm_type! {
    /// An object with the same identity already exists
    PbmAlreadyExists: PbmFault as base {
        /// Name of the existing object
        name: opt String => "name",
    }
}

pbm_type! {
    /// A placement hub failed a compatibility check
    PbmCompatibilityCheckFault: PbmFault as base {
        /// The incompatible hub
        hub: req PbmPlacementHub => "hub",
    }
}

pbm_type! {
    /// The hub's default profile applies instead of the requested one
    PbmDefaultProfileAppliesFault: PbmCompatibilityCheckFault as base {}
}

pbm_type! {
    /// A requirement property does not match what the hub offers
    PbmPropertyMismatchFault: PbmCompatibilityCheckFault as base {
        /// Capability the property belongs to
        capability_instance_id: req PbmCapabilityMetadataUniqueId => "capabilityInstanceId",
        /// The requirement that was not met
        requirement_property_instance: req PbmCapabilityPropertyInstance => "requirementPropertyInstance",
    }
}

pbm_type! {
    /// Mismatch against a resource capability profile
    PbmCapabilityProfilePropertyMismatchFault: PbmPropertyMismatchFault as base {
        /// What the resource offers
        resource_property_instance: req PbmCapabilityPropertyInstance => "resourcePropertyInstance",
    }
}

pbm_type! {
    /// Vendor-specific rule sets cannot be combined
    PbmIncompatibleVendorSpecificRuleSet: PbmCapabilityProfilePropertyMismatchFault as base {}
}

pbm_type! {
    /// A profile with this name already exists
    PbmDuplicateName: PbmFault as base {
        /// The duplicate name
        name: req String => "name",
    }
}

pbm_type! {
    /// Login credentials were rejected
    PbmFaultInvalidLogin: PbmFault as base {}
}

pbm_type! {
    /// Referenced PBM object does not exist
    PbmFaultNotFound: PbmFault as base {}
}

pbm_type! {
    /// Profile storage backend failure
    PbmFaultProfileStorageFault: PbmFault as base {}
}

pbm_type! {
    /// Privileges missing on one profile
    PbmFaultNoPermissionEntityPrivileges {
        /// Profile the privileges apply to
        profile_id: opt PbmProfileId => "profileId",
        /// Privilege identifiers that are missing
        privilege_ids: vec String => "privilegeIds",
    }
}

pbm_type! {
    /// The session lacks privileges for the operation
    PbmFaultNoPermission: SecurityError as base {
        /// Missing privileges per profile
        missing_privileges: vec PbmFaultNoPermissionEntityPrivileges => "missingPrivileges",
    }
}

pbm_type! {
    /// Hubs that do not support the requested operation
    PbmLegacyHubsNotSupported: PbmFault as base {
        /// The legacy hubs
        hubs: vec PbmPlacementHub => "hubs",
    }
}

pbm_type! {
    /// Hubs that do not exist
    PbmNonExistentHubs: PbmFault as base {
        /// The unknown hubs
        hubs: vec PbmPlacementHub => "hubs",
    }
}

pbm_type! {
    /// Object is still in use
    PbmResourceInUse: PbmFault as base {
        /// Kind of the object in use
        resource_type: opt String => "type",
        /// Name of the object in use
        name: opt String => "name",
    }
}

/// Access to the [`MethodFault`] at the bottom of a fault's base chain
pub trait AsMethodFault {
    /// The root payload
    fn method_fault(&self) -> &MethodFault;
}

impl AsMethodFault for MethodFault {
    fn method_fault(&self) -> &MethodFault {
        self
    }
}

macro_rules! derived_faults {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl AsMethodFault for $ty {
                fn method_fault(&self) -> &MethodFault {
                    self.base.method_fault()
                }
            }
        )+
    };
}

derived_faults!(
    RuntimeFault,
    SecurityError,
    InvalidArgument,
    VimFault,
    NotFound,
    SystemError,
    PbmFault,
    PbmAlreadyExists,
    PbmCompatibilityCheckFault,
    PbmDefaultProfileAppliesFault,
    PbmPropertyMismatchFault,
    PbmCapabilityProfilePropertyMismatchFault,
    PbmIncompatibleVendorSpecificRuleSet,
    PbmDuplicateName,
    PbmFaultInvalidLogin,
    PbmFaultNotFound,
    PbmFaultProfileStorageFault,
    PbmFaultNoPermission,
    PbmLegacyHubsNotSupported,
    PbmNonExistentHubs,
    PbmResourceInUse,
);

macro_rules! fault_family {
    ($($variant:ident => $prefix:literal),+ $(,)?) => {
        /// Any fault, discriminated by `xsi:type`
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum Fault {
            $(
                #[doc = concat!("`", stringify!($variant), "`")]
                $variant($variant),
            )+
            /// A fault type outside this crate's schema; only the
            /// [`MethodFault`] payload is kept
            Unrecognized {
                /// Local schema name from `xsi:type`
                type_name: String,
                /// Common fault payload
                base: MethodFault,
            },
        }

        impl Fault {
            /// Schema name of the concrete fault type
            pub fn type_name(&self) -> &str {
                match self {
                    $( Fault::$variant(_) => stringify!($variant), )+
                    Fault::Unrecognized { type_name, .. } => type_name,
                }
            }

            /// The common [`MethodFault`] payload
            pub fn base(&self) -> &MethodFault {
                match self {
                    $( Fault::$variant(fault) => fault.method_fault(), )+
                    Fault::Unrecognized { base, .. } => base,
                }
            }

            /// Whether `name` is a fault type known to this crate
            pub fn is_known_type(name: &str) -> bool {
                matches!(name, $( stringify!($variant) )|+)
            }

            fn qualified_type_name(&self) -> Cow<'static, str> {
                match self {
                    $( Fault::$variant(_) => Cow::Borrowed(concat!($prefix, stringify!($variant))), )+
                    Fault::Unrecognized { type_name, .. } => Cow::Owned(format!("vim25:{}", type_name)),
                }
            }

            /// Decode `element` as the fault type `type_name`
            pub fn decode_as(type_name: &str, element: &Element) -> Result<Self> {
                match type_name {
                    $( stringify!($variant) => $variant::from_xml(element).map(Fault::$variant), )+
                    other => {
                        tracing::debug!(fault_type = other, "decoding unrecognized fault type");
                        Ok(Fault::Unrecognized {
                            type_name: other.to_string(),
                            base: MethodFault::from_xml(element)?,
                        })
                    }
                }
            }
        }

        impl ToXml for Fault {
            fn xsi_type(&self) -> Option<Cow<'static, str>> {
                Some(self.qualified_type_name())
            }

            fn write_children(&self, writer: &mut XmlWriter) -> Result<()> {
                match self {
                    $( Fault::$variant(fault) => fault.write_children(writer), )+
                    Fault::Unrecognized { base, .. } => base.write_children(writer),
                }
            }
        }

        $(
            impl From<$variant> for Fault {
                fn from(fault: $variant) -> Self {
                    Fault::$variant(fault)
                }
            }
        )+
    };
}

fault_family!(
    MethodFault => "vim25:",
    RuntimeFault => "vim25:",
    SecurityError => "vim25:",
    InvalidArgument => "vim25:",
    VimFault => "vim25:",
    NotFound => "vim25:",
    SystemError => "vim25:",
    PbmFault => "",
    PbmAlreadyExists => "",
    PbmCompatibilityCheckFault => "",
    PbmDefaultProfileAppliesFault => "",
    PbmPropertyMismatchFault => "",
    PbmCapabilityProfilePropertyMismatchFault => "",
    PbmIncompatibleVendorSpecificRuleSet => "",
    PbmDuplicateName => "",
    PbmFaultInvalidLogin => "",
    PbmFaultNotFound => "",
    PbmFaultProfileStorageFault => "",
    PbmFaultNoPermission => "",
    PbmLegacyHubsNotSupported => "",
    PbmNonExistentHubs => "",
    PbmResourceInUse => "",
);

impl Fault {
    /// Whether the fault is `PbmFault` or one of its subtypes
    pub fn is_pbm_fault(&self) -> bool {
        matches!(
            self,
            Fault::PbmFault(_)
                | Fault::PbmAlreadyExists(_)
                | Fault::PbmDuplicateName(_)
                | Fault::PbmFaultInvalidLogin(_)
                | Fault::PbmFaultNotFound(_)
                | Fault::PbmFaultProfileStorageFault(_)
                | Fault::PbmLegacyHubsNotSupported(_)
                | Fault::PbmNonExistentHubs(_)
                | Fault::PbmResourceInUse(_)
        ) || self.is_compatibility_check_fault()
    }

    /// Whether the fault is `PbmCompatibilityCheckFault` or one of its subtypes
    pub fn is_compatibility_check_fault(&self) -> bool {
        matches!(
            self,
            Fault::PbmCompatibilityCheckFault(_) | Fault::PbmDefaultProfileAppliesFault(_)
        ) || self.is_property_mismatch_fault()
    }

    /// Whether the fault is `PbmPropertyMismatchFault` or one of its subtypes
    pub fn is_property_mismatch_fault(&self) -> bool {
        matches!(
            self,
            Fault::PbmPropertyMismatchFault(_)
                | Fault::PbmCapabilityProfilePropertyMismatchFault(_)
                | Fault::PbmIncompatibleVendorSpecificRuleSet(_)
        )
    }

    /// Whether the fault is `RuntimeFault` or one of its subtypes
    pub fn is_runtime_fault(&self) -> bool {
        matches!(
            self,
            Fault::RuntimeFault(_)
                | Fault::SecurityError(_)
                | Fault::InvalidArgument(_)
                | Fault::SystemError(_)
                | Fault::PbmFaultNoPermission(_)
        )
    }

    /// The hub a compatibility check fault refers to
    pub fn hub(&self) -> Option<&PbmPlacementHub> {
        match self {
            Fault::PbmCompatibilityCheckFault(f) => Some(&f.hub),
            Fault::PbmDefaultProfileAppliesFault(f) => Some(&f.base.hub),
            Fault::PbmPropertyMismatchFault(f) => Some(&f.base.hub),
            Fault::PbmCapabilityProfilePropertyMismatchFault(f) => Some(&f.base.base.hub),
            Fault::PbmIncompatibleVendorSpecificRuleSet(f) => Some(&f.base.base.base.hub),
            _ => None,
        }
    }
}

impl Default for Fault {
    fn default() -> Self {
        Fault::MethodFault(MethodFault::default())
    }
}

impl XmlType for Fault {
    const TYPE_NAME: &'static str = "MethodFault";
}

impl FromXml for Fault {
    fn from_xml(element: &Element) -> Result<Self> {
        match element.xsi_type()? {
            Some(qname) => Self::decode_as(&qname.local_name, element),
            None => MethodFault::from_xml(element).map(Fault::MethodFault),
        }
    }
}

/// A fault raised by the server, with its message
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FaultException {
    message: String,
    fault: Fault,
}

impl FaultException {
    /// Create an exception from a message and a fault payload
    pub fn new(message: impl Into<String>, fault: impl Into<Fault>) -> Self {
        Self {
            message: message.into(),
            fault: fault.into(),
        }
    }

    /// The `InvalidArgument` exception for the property at `invalid_property`
    pub fn invalid_argument(message: impl Into<String>, invalid_property: Option<String>) -> Self {
        Self::new(
            message,
            InvalidArgument {
                invalid_property,
                ..Default::default()
            },
        )
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fault payload
    pub fn fault_info(&self) -> &Fault {
        &self.fault
    }

    /// Take the fault payload
    pub fn into_fault(self) -> Fault {
        self.fault
    }

    /// Decode a fault from the element inside a SOAP fault `detail`.
    ///
    /// The type comes from `xsi:type` when present. Otherwise the element
    /// name is used, with the `Fault` suffix of the document/literal
    /// convention (`InvalidArgumentFault`) removed.
    pub fn from_detail_xml(xml: &str, limits: &Limits) -> Result<Self> {
        let document = Document::parse(xml, limits)?;
        Self::from_detail_element(&document.root)
    }

    /// Decode a fault from an already parsed detail element
    pub fn from_detail_element(root: &Element) -> Result<Self> {
        let type_name = match root.xsi_type()? {
            Some(qname) => qname.local_name,
            None => {
                let local = root.local_name();
                if Fault::is_known_type(local) {
                    local.to_string()
                } else {
                    local.strip_suffix("Fault").unwrap_or(local).to_string()
                }
            }
        };

        let fault = Fault::decode_as(&type_name, root).map_err(|e| e.within(root.local_name()))?;
        let message = fault
            .base()
            .fault_message
            .iter()
            .find_map(|m| m.message.clone())
            .unwrap_or_else(|| fault.type_name().to_string());

        Ok(Self { message, fault })
    }

    /// Encode the fault as a detail element named `{type}Fault`
    pub fn to_detail_xml(&self, options: &EncodeOptions) -> Result<String> {
        let root = format!("{}Fault", self.fault.type_name());
        to_xml_string(&root, &self.fault, options)
    }
}
