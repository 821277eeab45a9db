//! PBM complex types
//!
//! Types are grouped by the service area that uses them. Polymorphic slots
//! (a base type and its schema subtypes) are the `Any*` enums, discriminated
//! on the wire by `xsi:type`.

pub mod capability;
pub mod compliance;
pub mod placement;
pub mod profile;
pub mod service;

pub use capability::{AnyCapabilityConstraints, AnyCapabilityTypeInfo, AnyLineOfServiceInfo};
pub use placement::{AnyPlacementMatchingResources, AnyPlacementRequirement};
pub use profile::AnyProfile;
