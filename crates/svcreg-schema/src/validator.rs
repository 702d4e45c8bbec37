use std::sync::Arc;

use serde_json::{Map, Number, Value as JsonValue};

use crate::config::ValidatorConfig;
use crate::error::{Result, SchemaError, ValidationErrors};
use crate::field::{FieldType, Primitive};
use crate::schema::SchemaType;
use crate::value::{Instance, Value};

const ROOT: &str = "$";

/// Validates raw payloads against, and serializes instances through, one schema.
///
/// Holds no mutable state; share freely across threads.
#[derive(Debug, Clone)]
pub struct MessageValidator {
    schema: Arc<SchemaType>,
    config: ValidatorConfig,
}

impl MessageValidator {
    pub fn new(schema: Arc<SchemaType>, config: ValidatorConfig) -> Self {
        Self { schema, config }
    }

    pub fn schema(&self) -> &Arc<SchemaType> {
        &self.schema
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check `raw` against the schema and build a typed instance.
    ///
    /// Absent optional fields are filled with their defaults. All offenses
    /// are reported together in [`SchemaError::Validation`].
    pub fn validate(&self, raw: &JsonValue) -> Result<Instance> {
        Codec::new(self.config).validate(&self.schema, raw)
    }

    /// Emit `instance` as a raw object in declared field order.
    pub fn serialize(&self, instance: &Instance) -> Result<JsonValue> {
        Codec::new(self.config).serialize(&self.schema, instance)
    }
}

/// Decode a raw JSON value as `ty`, e.g. a default taken from a definition
/// document. Unknown object fields are rejected.
pub fn decode_value(
    ty: &FieldType,
    raw: &JsonValue,
) -> std::result::Result<Value, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match Codec::new(ValidatorConfig::strict()).decode(ty, raw, "", &mut errors) {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(errors),
    }
}

/// The decode/encode walk shared by validation, serialization and default checks.
pub(crate) struct Codec {
    config: ValidatorConfig,
}

impl Codec {
    pub(crate) fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub(crate) fn validate(&self, schema: &SchemaType, raw: &JsonValue) -> Result<Instance> {
        let mut errors = ValidationErrors::new();
        match self.decode_message(schema, raw, "", &mut errors) {
            Some(instance) if errors.is_empty() => Ok(instance),
            _ => Err(SchemaError::Validation {
                schema: schema.name().to_string(),
                errors,
            }),
        }
    }

    pub(crate) fn serialize(&self, schema: &SchemaType, instance: &Instance) -> Result<JsonValue> {
        if instance.schema_name() != schema.name() {
            return Err(SchemaError::SchemaMismatch {
                expected: schema.name().to_string(),
                found: instance.schema_name().to_string(),
            });
        }

        let mut errors = ValidationErrors::new();
        match self.encode_message(schema, instance, "", &mut errors) {
            Some(map) if errors.is_empty() => Ok(JsonValue::Object(map)),
            _ => Err(SchemaError::Validation {
                schema: schema.name().to_string(),
                errors,
            }),
        }
    }

    fn decode_message(
        &self,
        schema: &SchemaType,
        raw: &JsonValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Instance> {
        let Some(object) = raw.as_object() else {
            errors.push(
                display_path(path),
                format!("expected {} object, found {}", schema.name(), json_kind(raw)),
            );
            return None;
        };

        let mut instance = Instance::new(schema.name());
        let mut complete = true;

        for field in schema.fields() {
            let field_path = join(path, field.name());
            let value = match object.get(field.name()) {
                Some(raw_value) => self.decode(field.field_type(), raw_value, &field_path, errors),
                None => {
                    let default = field.effective_default();
                    if default.is_none() {
                        errors.push(field_path, "missing required field");
                    }
                    default
                }
            };
            match value {
                Some(value) => {
                    instance.set(field.name(), value);
                }
                None => complete = false,
            }
        }

        for key in object.keys() {
            if schema.field(key).is_some() {
                continue;
            }
            if self.config.strict_mode {
                errors.push(join(path, key), "unknown field");
                complete = false;
            } else {
                tracing::debug!(schema = schema.name(), field = %key, "ignoring unknown field");
            }
        }

        complete.then_some(instance)
    }

    pub(crate) fn decode(
        &self,
        ty: &FieldType,
        raw: &JsonValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Value> {
        let decoded = match (ty, raw) {
            (FieldType::Optional(_), JsonValue::Null) => Some(Value::Null),
            (FieldType::Optional(inner), _) => return self.decode(inner, raw, path, errors),
            (FieldType::Primitive(Primitive::String), JsonValue::String(text)) => {
                Some(Value::String(text.clone()))
            }
            (FieldType::Primitive(Primitive::Integer), JsonValue::Number(number))
                if number.is_u64() && !number.is_i64() =>
            {
                errors.push(display_path(path), "integer out of range");
                return None;
            }
            (FieldType::Primitive(Primitive::Integer), JsonValue::Number(number)) => {
                number.as_i64().or_else(|| whole_f64(number)).map(Value::Integer)
            }
            (FieldType::Primitive(Primitive::Number), JsonValue::Number(number)) => {
                number.as_f64().map(Value::Number)
            }
            (FieldType::Primitive(Primitive::Boolean), JsonValue::Bool(flag)) => {
                Some(Value::Bool(*flag))
            }
            (FieldType::List(item), JsonValue::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                let mut complete = true;
                for (idx, raw_item) in items.iter().enumerate() {
                    match self.decode(item, raw_item, &format!("{path}[{idx}]"), errors) {
                        Some(value) => values.push(value),
                        None => complete = false,
                    }
                }
                return complete.then_some(Value::List(values));
            }
            (FieldType::Schema(schema), _) => {
                return self
                    .decode_message(schema, raw, path, errors)
                    .map(Value::Message);
            }
            _ => None,
        };

        if decoded.is_none() {
            errors.push(
                display_path(path),
                format!("expected {ty}, found {}", json_kind(raw)),
            );
        }
        decoded
    }

    fn encode_message(
        &self,
        schema: &SchemaType,
        instance: &Instance,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Map<String, JsonValue>> {
        let mut map = Map::new();
        let mut complete = true;

        for field in schema.fields() {
            let field_path = join(path, field.name());
            let default = field.effective_default();
            let Some(value) = instance.get(field.name()).or(default.as_ref()) else {
                errors.push(field_path, "missing required field");
                complete = false;
                continue;
            };

            if self.config.compact_encoding && default.as_ref() == Some(value) {
                continue;
            }

            match self.encode(field.field_type(), value, &field_path, errors) {
                Some(raw) => {
                    map.insert(field.name().to_string(), raw);
                }
                None => complete = false,
            }
        }

        for (name, _) in instance.fields() {
            if schema.field(name).is_none() {
                errors.push(join(path, name), "unknown field");
                complete = false;
            }
        }

        complete.then_some(map)
    }

    pub(crate) fn encode(
        &self,
        ty: &FieldType,
        value: &Value,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<JsonValue> {
        let encoded = match (ty, value) {
            (FieldType::Optional(_), Value::Null) => Some(JsonValue::Null),
            (FieldType::Optional(inner), _) => return self.encode(inner, value, path, errors),
            (FieldType::Primitive(Primitive::String), Value::String(text)) => {
                Some(JsonValue::String(text.clone()))
            }
            (FieldType::Primitive(Primitive::Integer), Value::Integer(number)) => {
                Some(JsonValue::from(*number))
            }
            (FieldType::Primitive(Primitive::Number), Value::Integer(number)) => {
                Some(JsonValue::from(*number))
            }
            (FieldType::Primitive(Primitive::Number), Value::Number(number)) => {
                let Some(number) = Number::from_f64(*number) else {
                    errors.push(display_path(path), "number must be finite");
                    return None;
                };
                Some(JsonValue::Number(number))
            }
            (FieldType::Primitive(Primitive::Boolean), Value::Bool(flag)) => {
                Some(JsonValue::Bool(*flag))
            }
            (FieldType::List(item), Value::List(values)) => {
                let mut items = Vec::with_capacity(values.len());
                let mut complete = true;
                for (idx, value) in values.iter().enumerate() {
                    match self.encode(item, value, &format!("{path}[{idx}]"), errors) {
                        Some(raw) => items.push(raw),
                        None => complete = false,
                    }
                }
                return complete.then_some(JsonValue::Array(items));
            }
            (FieldType::Schema(schema), Value::Message(nested)) => {
                if nested.schema_name() != schema.name() {
                    errors.push(
                        display_path(path),
                        format!(
                            "expected {} message, found {} message",
                            schema.name(),
                            nested.schema_name()
                        ),
                    );
                    return None;
                }
                return self
                    .encode_message(schema, nested, path, errors)
                    .map(JsonValue::Object);
            }
            _ => None,
        };

        if encoded.is_none() {
            errors.push(
                display_path(path),
                format!("expected {ty}, found {}", value.kind()),
            );
        }
        encoded
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// A float with no fractional part that fits `i64`, e.g. `30.0`.
fn whole_f64(number: &Number) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn json_kind(raw: &JsonValue) -> &'static str {
    match raw {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(number) if number.is_i64() || number.is_u64() => "integer",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
