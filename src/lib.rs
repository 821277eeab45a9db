//! # pbm-bindings
//!
//! Typed Rust bindings for the VMware Storage Policy-Based Management (PBM)
//! schema, namespace `urn:pbm`, with an XML codec that reads and writes the
//! same documents a PBM server exchanges.
//!
//! ## Features
//!
//! - Every PBM complex type as a plain struct with public fields
//! - Polymorphic slots as enums dispatched on `xsi:type`
//! - Closed enumerations with wire-token lookup
//! - The fault hierarchy and a [`faults::FaultException`] error value
//! - Request and response bodies of the PBM operations
//! - A JSON bridge through serde and a name-based type registry
//! - Protection against oversized and deeply nested documents
//!
//! ## Example
//!
//! ```rust
//! use pbm::codec::{from_xml, to_xml};
//! use pbm::enums::PbmObjectType;
//! use pbm::types::service::PbmServerObjectRef;
//!
//! let vm = PbmServerObjectRef::new(PbmObjectType::VirtualMachine, "vm-42");
//! let xml = to_xml(&vm)?;
//! let back: PbmServerObjectRef = from_xml(&xml)?;
//! assert_eq!(back, vm);
//! # Ok::<(), pbm::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

// Foundation
pub mod error;
pub mod limits;

// XML plumbing
pub mod namespaces;
pub mod names;
pub mod documents;
pub mod codec;

// Schema types
pub mod enums;
pub mod arrays;
pub mod value;
pub mod vim;
pub mod faults;
pub mod types;
pub mod requests;

// Run-time lookup
pub mod registry;

// Re-exports for convenience
pub use codec::{from_xml, from_xml_str, to_xml, to_xml_string, EncodeOptions};
pub use error::{Error, Result};
pub use faults::{Fault, FaultException};
pub use limits::Limits;
pub use requests::Operation;

/// Version of the pbm-bindings library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Namespace of the PBM schema
pub use namespaces::PBM_NAMESPACE;
