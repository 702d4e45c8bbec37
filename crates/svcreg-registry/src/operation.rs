use std::sync::Arc;

use svcreg_schema::{MessageValidator, SchemaType, ValidatorConfig};

use crate::error::{RegistryError, Result};

/// The four payload shapes an operation can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationShape {
    /// Input and output.
    RequestResponse,
    /// Input only; answered with an empty acknowledgment.
    RequestOnly,
    /// Output only; a parameterless query.
    ResponseOnly,
    /// Neither input nor output.
    Signal,
}

impl OperationShape {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationShape::RequestResponse => "request-response",
            OperationShape::RequestOnly => "request-only",
            OperationShape::ResponseOnly => "response-only",
            OperationShape::Signal => "signal",
        }
    }
}

/// Binds a wire name to an optional input and optional output schema.
///
/// A missing schema is a distinct state from an empty one: an operation
/// without input never sees a payload validated.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    code_name: String,
    wire_name: String,
    input: Option<Arc<SchemaType>>,
    output: Option<Arc<SchemaType>>,
    doc: String,
}

impl OperationDescriptor {
    pub fn builder(code_name: impl Into<String>) -> OperationBuilder {
        OperationBuilder {
            code_name: code_name.into(),
            wire_name: None,
            input: None,
            output: None,
            doc: String::new(),
        }
    }

    /// Identifier used by implementers.
    pub fn code_name(&self) -> &str {
        &self.code_name
    }

    /// Identifier used on the wire.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn input_schema(&self) -> Option<&Arc<SchemaType>> {
        self.input.as_ref()
    }

    pub fn output_schema(&self) -> Option<&Arc<SchemaType>> {
        self.output.as_ref()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn accepts_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn produces_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn shape(&self) -> OperationShape {
        match (self.accepts_input(), self.produces_output()) {
            (true, true) => OperationShape::RequestResponse,
            (true, false) => OperationShape::RequestOnly,
            (false, true) => OperationShape::ResponseOnly,
            (false, false) => OperationShape::Signal,
        }
    }

    pub fn input_validator(&self, config: ValidatorConfig) -> Option<MessageValidator> {
        self.input.as_ref().map(|schema| schema.validator(config))
    }

    pub fn output_validator(&self, config: ValidatorConfig) -> Option<MessageValidator> {
        self.output.as_ref().map(|schema| schema.validator(config))
    }
}

/// Builder for [`OperationDescriptor`]. The wire name defaults to the code name.
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    code_name: String,
    wire_name: Option<String>,
    input: Option<Arc<SchemaType>>,
    output: Option<Arc<SchemaType>>,
    doc: String,
}

impl OperationBuilder {
    #[must_use]
    pub fn wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    #[must_use]
    pub fn input(self, schema: Arc<SchemaType>) -> Self {
        self.maybe_input(Some(schema))
    }

    #[must_use]
    pub fn output(self, schema: Arc<SchemaType>) -> Self {
        self.maybe_output(Some(schema))
    }

    #[must_use]
    pub fn maybe_input(mut self, schema: Option<Arc<SchemaType>>) -> Self {
        self.input = schema;
        self
    }

    #[must_use]
    pub fn maybe_output(mut self, schema: Option<Arc<SchemaType>>) -> Self {
        self.output = schema;
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn build(self) -> Result<OperationDescriptor> {
        validate_identifier("operation code name", &self.code_name)?;
        let wire_name = self.wire_name.unwrap_or_else(|| self.code_name.clone());
        validate_wire_name("operation wire name", &wire_name)?;

        Ok(OperationDescriptor {
            code_name: self.code_name,
            wire_name,
            input: self.input,
            output: self.output,
            doc: self.doc,
        })
    }
}

/// Checks `value` against `^[a-zA-Z][a-zA-Z0-9_]*$`.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<()> {
    let invalid = |reason| RegistryError::InvalidIdentifier {
        kind,
        value: value.to_string(),
        reason,
    };

    let mut chars = value.chars();
    match chars.next() {
        None => return Err(invalid("must not be empty")),
        Some(first) if !first.is_ascii_alphabetic() => {
            return Err(invalid("must start with an ASCII letter"));
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("may only contain ASCII letters, digits and '_'"));
    }
    Ok(())
}

/// Wire names are free-form but must carry at least one visible character
/// and no control characters.
pub fn validate_wire_name(kind: &'static str, value: &str) -> Result<()> {
    let invalid = |reason| RegistryError::InvalidIdentifier {
        kind,
        value: value.to_string(),
        reason,
    };

    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.chars().any(char::is_control) {
        return Err(invalid("must not contain control characters"));
    }
    Ok(())
}
