//! Typed message schemas for the operation-descriptor registry.
//!
//! A [`SchemaType`] is an ordered set of typed, optionally defaulted fields.
//! [`MessageValidator`] turns untyped JSON payloads into typed [`Instance`]s
//! and back, collecting every field-level offense rather than stopping at the
//! first one.
//!
//! Validation is strict or lenient about unknown fields, and serialization
//! can drop fields equal to their default; both are set through
//! [`ValidatorConfig`].

pub mod config;
pub mod error;
pub mod field;
pub mod schema;
pub mod validator;
pub mod value;

pub use config::ValidatorConfig;
pub use error::{Result, SchemaError, ValidationError, ValidationErrors};
pub use field::{Field, FieldType, Primitive};
pub use schema::{SchemaBuilder, SchemaType};
pub use validator::{decode_value, MessageValidator};
pub use value::{Instance, Value};
