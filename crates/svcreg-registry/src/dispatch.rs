//! In-process reference dispatcher.
//!
//! Turns `(service, wire operation, payload)` into a handler call:
//! resolve, validate input when the operation declares one, invoke the
//! handler, then serialize output or acknowledge.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use svcreg_schema::{Instance, SchemaError, ValidationErrors, ValidatorConfig};

use crate::error::{DispatchError, ResolveError};
use crate::registry::Registry;

/// Error returned by application handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a [`Handler`] returns.
pub type HandlerResult = Result<Option<Instance>, HandlerError>;

/// Application logic behind one operation.
///
/// Receives the validated input instance (`None` for operations without an
/// input schema) and returns the output instance (`None` for operations
/// without an output schema).
pub trait Handler: Send + Sync {
    fn call(&self, input: Option<Instance>) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(Option<Instance>) -> HandlerResult + Send + Sync,
{
    fn call(&self, input: Option<Instance>) -> HandlerResult {
        self(input)
    }
}

/// What a successful dispatch returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Serialized output payload.
    Payload(JsonValue),
    /// Empty acknowledgment for operations without an output schema.
    Ack,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HandlerKey {
    service: String,
    code_name: String,
}

impl HandlerKey {
    fn new(service: &str, code_name: &str) -> Self {
        Self {
            service: service.to_string(),
            code_name: code_name.to_string(),
        }
    }
}

/// Routes requests through a sealed [`Registry`] to bound handlers.
pub struct Dispatcher {
    registry: Arc<Registry>,
    config: ValidatorConfig,
    handlers: HashMap<HandlerKey, Arc<dyn Handler>>,
}

impl Dispatcher {
    /// Create a dispatcher with default validator config.
    pub fn new(registry: Arc<Registry>) -> Result<Self, DispatchError> {
        Self::with_config(registry, ValidatorConfig::default())
    }

    /// Create a dispatcher with explicit validator config.
    pub fn with_config(
        registry: Arc<Registry>,
        config: ValidatorConfig,
    ) -> Result<Self, DispatchError> {
        if !registry.is_sealed() {
            return Err(DispatchError::RegistryNotSealed);
        }
        Ok(Self {
            registry,
            config,
            handlers: HashMap::new(),
        })
    }

    /// Bind `handler` to the operation with `code_name` in `service`.
    /// A later binding for the same operation replaces the earlier one.
    pub fn handle<H>(
        &mut self,
        service: &str,
        code_name: &str,
        handler: H,
    ) -> Result<(), DispatchError>
    where
        H: Handler + 'static,
    {
        let descriptor = self
            .registry
            .service(service)
            .ok_or_else(|| ResolveError::UnknownService(service.to_string()))?;
        if descriptor.get(code_name).is_none() {
            return Err(ResolveError::UnknownOperation {
                service: service.to_string(),
                operation: code_name.to_string(),
            }
            .into());
        }

        self.handlers
            .insert(HandlerKey::new(service, code_name), Arc::new(handler));
        Ok(())
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Dispatch one request.
    ///
    /// `payload` is ignored, and never validated, for operations without an
    /// input schema.
    pub fn dispatch(
        &self,
        service: &str,
        wire_operation: &str,
        payload: Option<&JsonValue>,
    ) -> Result<Reply, DispatchError> {
        let op = self.registry.resolve(service, wire_operation)?;
        let operation = || op.wire_name().to_string();

        tracing::debug!(
            service,
            operation = wire_operation,
            shape = op.shape().as_str(),
            "dispatching"
        );

        let input = match op.input_schema() {
            Some(schema) => {
                let raw = payload.ok_or_else(|| DispatchError::MissingPayload {
                    service: service.to_string(),
                    operation: operation(),
                })?;
                let instance = schema.validate(raw, self.config).map_err(|err| {
                    DispatchError::BadRequest {
                        service: service.to_string(),
                        operation: operation(),
                        errors: into_validation_errors(err),
                    }
                })?;
                Some(instance)
            }
            None => {
                if payload.is_some() {
                    tracing::debug!(
                        service,
                        operation = wire_operation,
                        "ignoring payload for operation without input"
                    );
                }
                None
            }
        };

        let handler = self
            .handlers
            .get(&HandlerKey::new(service, op.code_name()))
            .ok_or_else(|| DispatchError::NoHandler {
                service: service.to_string(),
                operation: operation(),
            })?;

        let output = handler
            .call(input)
            .map_err(|source| DispatchError::Handler {
                service: service.to_string(),
                operation: operation(),
                source,
            })?;

        let bad_response = |reason: String| DispatchError::BadResponse {
            service: service.to_string(),
            operation: operation(),
            reason,
        };

        match (op.output_schema(), output) {
            (Some(schema), Some(instance)) => schema
                .serialize(&instance, self.config)
                .map(Reply::Payload)
                .map_err(|err| bad_response(err.to_string())),
            (Some(_), None) => Err(bad_response("handler returned no output".to_string())),
            (None, Some(_)) => Err(bad_response(
                "handler returned output for an operation without output".to_string(),
            )),
            (None, None) => Ok(Reply::Ack),
        }
    }
}

fn into_validation_errors(err: SchemaError) -> ValidationErrors {
    match err {
        SchemaError::Validation { errors, .. } => errors,
        other => {
            let mut errors = ValidationErrors::new();
            errors.push("$", other.to_string());
            errors
        }
    }
}
