use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::config::ValidatorConfig;
use crate::error::{Result, SchemaError, ValidationErrors};
use crate::field::Field;
use crate::validator::{Codec, MessageValidator};
use crate::value::Instance;

/// An ordered, named set of typed fields describing one message shape.
///
/// Built once through [`SchemaType::builder`] and shared behind an `Arc` by
/// every operation and field that refers to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    name: String,
    doc: String,
    fields: IndexMap<String, Field>,
}

impl SchemaType {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            doc: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a raw payload against this schema.
    pub fn validate(&self, raw: &JsonValue, config: ValidatorConfig) -> Result<Instance> {
        Codec::new(config).validate(self, raw)
    }

    /// Serialize an instance of this schema into a raw payload.
    pub fn serialize(&self, instance: &Instance, config: ValidatorConfig) -> Result<JsonValue> {
        Codec::new(config).serialize(self, instance)
    }

    /// A reusable validator bound to this schema.
    pub fn validator(self: &Arc<Self>, config: ValidatorConfig) -> MessageValidator {
        MessageValidator::new(Arc::clone(self), config)
    }
}

/// Collects fields for a [`SchemaType`] and checks them on [`SchemaBuilder::build`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    doc: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Finish the schema.
    ///
    /// Fails on an empty schema or field name, a repeated field name, or a
    /// default that does not conform to its field's type. Defaults are stored
    /// in the form validation would produce for them.
    pub fn build(self) -> Result<Arc<SchemaType>> {
        let invalid = |reason: String| SchemaError::InvalidSchema {
            schema: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("schema name must not be empty".to_string()));
        }

        let codec = Codec::new(ValidatorConfig::strict());
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for mut field in self.fields.iter().cloned() {
            if field.name.trim().is_empty() {
                return Err(invalid("field name must not be empty".to_string()));
            }
            if fields.contains_key(&field.name) {
                return Err(invalid(format!("duplicate field name: {}", field.name)));
            }

            if let Some(default) = field.default.take() {
                let mut errors = ValidationErrors::new();
                let normalized = codec
                    .encode(&field.ty, &default, &field.name, &mut errors)
                    .and_then(|raw| codec.decode(&field.ty, &raw, &field.name, &mut errors));
                match normalized {
                    Some(value) if errors.is_empty() => field.default = Some(value),
                    _ => {
                        return Err(invalid(format!(
                            "default for field {} does not match {}: {errors}",
                            field.name, field.ty
                        )));
                    }
                }
            }

            fields.insert(field.name.clone(), field);
        }

        tracing::debug!(schema = %self.name, fields = fields.len(), "schema built");

        Ok(Arc::new(SchemaType {
            name: self.name,
            doc: self.doc,
            fields,
        }))
    }
}
