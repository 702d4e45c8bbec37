use svcreg_registry::RegistryError;
use svcreg_schema::SchemaError;

/// Errors that can occur while loading definition documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A document could not be read from disk.
    #[error("failed to load definition: {0}")]
    LoadFailed(String),

    /// The document is not valid JSON.
    #[error("definition {origin} is not valid JSON: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document declares a `$schema` other than the service definition dialect.
    #[error("definition {origin} has unsupported $schema {found:?}")]
    UnsupportedSchema { origin: String, found: String },

    /// The document does not match the definition format.
    #[error("definition {origin} is invalid: {message}")]
    InvalidDocument { origin: String, message: String },

    /// Two documents (or one document twice) define the same type name.
    #[error("type {name} defined in both {first} and {second}")]
    DuplicateType {
        name: String,
        first: String,
        second: String,
    },

    /// A type reference does not name a known type.
    #[error("could not find type {reference} for {context}")]
    UnknownType { reference: String, context: String },

    /// Types refer to each other in a loop.
    #[error("type reference cycle: {0}")]
    TypeCycle(String),

    /// A type definition is structurally wrong.
    #[error("invalid type {name}: {reason}")]
    InvalidType { name: String, reason: String },

    /// Building a schema from a type definition failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Registering a service or operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The embedded definition meta-schema failed to compile.
    #[error("failed to compile definition meta-schema: {0}")]
    MetaSchema(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
