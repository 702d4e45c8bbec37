use svcreg_schema::ValidationErrors;

use crate::dispatch::HandlerError;

/// Definition-time errors. These indicate a broken interface contract and
/// are meant to abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A service name, code name or wire name is malformed.
    #[error("invalid {kind} {value:?}: {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The code name or wire name is already taken within the service.
    #[error("{kind} {name:?} already registered in service {service}")]
    DuplicateOperation {
        service: String,
        kind: &'static str,
        name: String,
    },

    /// A service with this name is already registered.
    #[error("service {0:?} already registered")]
    DuplicateService(String),

    /// The registry was sealed; no further registration is accepted.
    #[error("registry is sealed")]
    Sealed,
}

/// Resolution-time misses. `Registry::resolve` never fails any other way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown service {0:?}")]
    UnknownService(String),

    #[error("unknown operation {operation:?} in service {service}")]
    UnknownOperation { service: String, operation: String },
}

/// Per-request failures surfaced by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The (service, operation) pair does not resolve.
    #[error("unknown operation: {0}")]
    Resolve(#[from] ResolveError),

    /// The payload violates the operation's input schema.
    #[error("bad request for {service}/{operation}: {errors}")]
    BadRequest {
        service: String,
        operation: String,
        errors: ValidationErrors,
    },

    /// The operation takes input but the request carried no payload.
    #[error("bad request for {service}/{operation}: payload required")]
    MissingPayload { service: String, operation: String },

    /// The operation is defined but nothing handles it.
    #[error("no handler bound for {service}/{operation}")]
    NoHandler { service: String, operation: String },

    /// Dispatch requires a sealed registry.
    #[error("registry must be sealed before dispatching")]
    RegistryNotSealed,

    /// The application handler failed.
    #[error("handler for {service}/{operation} failed: {source}")]
    Handler {
        service: String,
        operation: String,
        #[source]
        source: HandlerError,
    },

    /// The handler result does not fit the operation's output contract.
    #[error("invalid response from {service}/{operation}: {reason}")]
    BadResponse {
        service: String,
        operation: String,
        reason: String,
    },
}

impl DispatchError {
    /// True when the caller sent something wrong, false for server-side faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DispatchError::Resolve(_)
                | DispatchError::BadRequest { .. }
                | DispatchError::MissingPayload { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
