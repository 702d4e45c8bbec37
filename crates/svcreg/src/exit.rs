use std::fmt;
use std::io;

use svcreg_idl::LoadError;
use svcreg_registry::{RegistryError, ResolveError};
use svcreg_schema::SchemaError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn load_error(context: &str, err: LoadError) -> CliError {
    match err {
        LoadError::LoadFailed(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        LoadError::MetaSchema(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
        LoadError::Registry(RegistryError::Sealed) => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn resolve_error(err: ResolveError) -> CliError {
    CliError::new(USAGE, err.to_string())
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    match err {
        SchemaError::InvalidSchema { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use svcreg_schema::ValidationErrors;

    use super::*;

    #[test]
    fn permission_denied_maps_to_50() {
        let err = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, PERMISSION_DENIED);
    }

    #[test]
    fn unknown_operation_is_a_usage_error() {
        let err = resolve_error(ResolveError::UnknownService("Nope".to_string()));
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("Nope"));
    }

    #[test]
    fn definition_problems_are_data_invalid() {
        let err = load_error("load", LoadError::TypeCycle("A -> A".to_string()));
        assert_eq!(err.code, DATA_INVALID);
        assert_eq!(err.message, "load: type reference cycle: A -> A");

        let err = load_error("load", LoadError::LoadFailed("gone".to_string()));
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn validation_failures_are_data_invalid() {
        let mut errors = ValidationErrors::new();
        errors.push("user_id", "missing required field");
        let err = schema_error(
            "validate",
            SchemaError::Validation {
                schema: "GetPersonRequest".to_string(),
                errors,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
