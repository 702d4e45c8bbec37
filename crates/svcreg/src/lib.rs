//! Typed operation registry with schema-checked payloads.
//!
//! svcreg keeps a sealed, process-wide table of services and their
//! operations. Each operation carries optional input and output message
//! schemas, and incoming payloads are validated against them before any
//! handler runs.
//!
//! # Crate Structure
//!
//! - [`schema`]: message schemas, field types and the payload validator
//! - [`registry`]: operation and service descriptors, the registry and the dispatcher
//! - [`idl`]: JSON definition document loader (behind the `idl` feature)

/// Re-export schema types.
pub mod schema {
    pub use svcreg_schema::*;
}

/// Re-export registry types.
pub mod registry {
    pub use svcreg_registry::*;
}

/// Re-export definition loader types (requires `idl` feature).
#[cfg(feature = "idl")]
pub mod idl {
    pub use svcreg_idl::*;
}
