//! Loads JSON service definition documents into an operation registry.
//!
//! A definition document declares message types and services; each service
//! lists operations with optional `input` and `output` type references.
//! Documents are checked against an embedded JSON Schema, then every type is
//! built into a [`svcreg_schema::SchemaType`] and every service registered
//! into an unsealed [`svcreg_registry::Registry`].

pub mod config;
pub mod document;
pub mod error;
pub mod loader;

pub use config::LoaderConfig;
pub use document::{Document, DocumentParser, SCHEMA_URL};
pub use error::{LoadError, Result};
pub use loader::{load_paths, load_paths_with_config, Loader, DOCUMENT_SUFFIX};
