use std::fmt;

/// A single field-level offense found while validating or serializing a message.
///
/// `field` is a dotted path from the message root (`address.city`, `tags[2]`);
/// `$` denotes the root itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Every offense collected from one validate/serialize pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.push(ValidationError::new(field, reason));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Paths of the offending fields, in discovery order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|err| err.field.as_str())
    }

    /// Returns the first error recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|err| err.field == field)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors produced while defining schemas or moving messages through them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    /// The schema definition itself is malformed.
    #[error("invalid schema {schema}: {reason}")]
    InvalidSchema { schema: String, reason: String },

    /// A payload or instance violates the schema.
    #[error("validation failed for {schema}: {errors}")]
    Validation {
        schema: String,
        errors: ValidationErrors,
    },

    /// An instance built for one schema was handed to another.
    #[error("instance of {found} cannot be serialized as {expected}")]
    SchemaMismatch { expected: String, found: String },
}

impl SchemaError {
    /// Field-level offenses, when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SchemaError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
