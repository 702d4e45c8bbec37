//! The JSON service definition document.
//!
//! ```json
//! {
//!   "$schema": "http://api.nexus/draft-01/schema#",
//!   "types": {
//!     "GetPersonRequest": {
//!       "properties": { "user_id": { "type": "string" } },
//!       "required": ["user_id"]
//!     }
//!   },
//!   "services": [{
//!     "identifier": "Userservice",
//!     "operations": [{
//!       "identifier": "get_user",
//!       "name": "Get User",
//!       "input": "#/types/GetPersonRequest"
//!     }]
//!   }]
//! }
//! ```

use indexmap::IndexMap;
use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{LoadError, Result};

/// `$schema` value every definition document must carry.
pub const SCHEMA_URL: &str = "http://api.nexus/draft-01/schema#";

/// Prefix of in-document type references.
pub const TYPE_REF_PREFIX: &str = "#/types/";

const META_SCHEMA: &str = r##"{
    "$schema": "https://json-schema.org/draft/2020-12/schema",
    "type": "object",
    "required": ["$schema", "services"],
    "propertyNames": { "enum": ["$schema", "types", "services"] },
    "properties": {
        "types": {
            "type": "object",
            "additionalProperties": { "$ref": "#/$defs/type" }
        },
        "services": {
            "type": "array",
            "items": { "$ref": "#/$defs/service" }
        }
    },
    "$defs": {
        "identifier": { "type": "string", "pattern": "^[a-zA-Z][a-zA-Z0-9_]*$" },
        "typeRef": { "type": "string", "minLength": 1 },
        "service": {
            "type": "object",
            "required": ["identifier", "operations"],
            "properties": {
                "identifier": { "$ref": "#/$defs/identifier" },
                "name": { "type": "string", "minLength": 1 },
                "description": { "type": "string" },
                "operations": { "type": "array", "items": { "$ref": "#/$defs/operation" } }
            },
            "additionalProperties": false
        },
        "operation": {
            "type": "object",
            "required": ["identifier"],
            "properties": {
                "identifier": { "$ref": "#/$defs/identifier" },
                "name": { "type": "string", "minLength": 1 },
                "description": { "type": "string" },
                "input": { "$ref": "#/$defs/typeRef" },
                "output": { "$ref": "#/$defs/typeRef" }
            },
            "additionalProperties": false
        },
        "type": {
            "type": "object",
            "properties": {
                "description": { "type": "string" },
                "properties": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/$defs/property" }
                },
                "required": {
                    "type": "array",
                    "items": { "type": "string" },
                    "uniqueItems": true
                }
            },
            "additionalProperties": false
        },
        "property": {
            "type": "object",
            "properties": {
                "type": {
                    "anyOf": [
                        { "$ref": "#/$defs/kind" },
                        {
                            "type": "array",
                            "items": { "anyOf": [{ "$ref": "#/$defs/kind" }, { "const": "null" }] },
                            "minItems": 1,
                            "maxItems": 2,
                            "uniqueItems": true
                        }
                    ]
                },
                "items": { "$ref": "#/$defs/property" },
                "description": { "type": "string" },
                "nullable": { "type": "boolean" }
            }
        },
        "kind": { "enum": ["string", "integer", "number", "boolean", "array"] }
    }
}"##;

/// A parsed definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default)]
    pub types: IndexMap<String, TypeDef>,
    pub services: Vec<ServiceDef>,
}

/// A named message type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDef>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// One property of a [`TypeDef`]; becomes a schema field.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    #[serde(rename = "type")]
    pub kind: Option<PropertyKind>,
    pub items: Option<Box<PropertyDef>>,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: String,
    pub default: Option<JsonValue>,
    #[serde(default)]
    pub nullable: bool,
}

/// `"type": "string"` or `"type": ["string", "null"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertyKind {
    One(String),
    Many(Vec<String>),
}

impl PropertyKind {
    /// The non-null kind, if any, and whether `null` was listed.
    pub fn split(&self) -> (Option<&str>, bool) {
        match self {
            PropertyKind::One(kind) if kind == "null" => (None, true),
            PropertyKind::One(kind) => (Some(kind), false),
            PropertyKind::Many(kinds) => {
                let nullable = kinds.iter().any(|kind| kind == "null");
                let kind = kinds.iter().find(|kind| *kind != "null");
                (kind.map(String::as_str), nullable)
            }
        }
    }

    /// True when more than one non-null kind is listed.
    pub fn is_union(&self) -> bool {
        match self {
            PropertyKind::One(_) => false,
            PropertyKind::Many(kinds) => kinds.iter().filter(|kind| *kind != "null").count() > 1,
        }
    }
}

/// A service entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDef {
    pub identifier: String,
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub operations: Vec<OperationDef>,
}

impl ServiceDef {
    /// Registered service name: `name` when given, else the identifier.
    pub fn service_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identifier)
    }
}

/// An operation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationDef {
    pub identifier: String,
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub input: Option<String>,
    pub output: Option<String>,
}

/// Strip `#/types/` from a reference, accepting bare type names too.
pub fn type_name_from_ref(reference: &str) -> Option<&str> {
    match reference.strip_prefix(TYPE_REF_PREFIX) {
        Some(name) if !name.is_empty() && !name.contains('/') => Some(name),
        Some(_) => None,
        None if reference.starts_with('#') || reference.is_empty() => None,
        None => Some(reference),
    }
}

/// Parses documents and checks them against the embedded meta-schema.
pub struct DocumentParser {
    validator: Validator,
}

impl DocumentParser {
    pub fn new() -> Result<Self> {
        let meta: JsonValue = serde_json::from_str(META_SCHEMA)
            .map_err(|err| LoadError::MetaSchema(err.to_string()))?;
        let validator = jsonschema::validator_for(&meta)
            .map_err(|err| LoadError::MetaSchema(err.to_string()))?;
        Ok(Self { validator })
    }

    /// Parse `content`; `origin` names the source in errors.
    pub fn parse(&self, origin: &str, content: &str) -> Result<Document> {
        let value: JsonValue =
            serde_json::from_str(content).map_err(|source| LoadError::InvalidJson {
                origin: origin.to_string(),
                source,
            })?;
        self.parse_value(origin, value)
    }

    pub fn parse_value(&self, origin: &str, value: JsonValue) -> Result<Document> {
        match value.get("$schema") {
            Some(JsonValue::String(url)) if url == SCHEMA_URL => {}
            other => {
                return Err(LoadError::UnsupportedSchema {
                    origin: origin.to_string(),
                    found: other.map(ToString::to_string).unwrap_or_default(),
                });
            }
        }

        if let Some(message) = self.meta_errors(&value) {
            return Err(LoadError::InvalidDocument {
                origin: origin.to_string(),
                message,
            });
        }

        serde_json::from_value(value).map_err(|err| LoadError::InvalidDocument {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    /// The first few meta-schema violations joined by `"; "`, if any.
    fn meta_errors(&self, value: &JsonValue) -> Option<String> {
        let mut errors = self.validator.iter_errors(value);
        let first = errors.next()?;
        let mut message = first.to_string();
        for err in errors.take(3) {
            message.push_str("; ");
            message.push_str(&err.to_string());
        }
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let parser = DocumentParser::new().unwrap();
        let doc = parser
            .parse(
                "inline",
                r#"{"$schema":"http://api.nexus/draft-01/schema#","services":[]}"#,
            )
            .unwrap();
        assert!(doc.types.is_empty());
        assert!(doc.services.is_empty());
    }

    #[test]
    fn wrong_schema_url_is_rejected() {
        let parser = DocumentParser::new().unwrap();
        let result = parser.parse("inline", r#"{"$schema":"http://example.com","services":[]}"#);
        assert!(matches!(result, Err(LoadError::UnsupportedSchema { .. })));

        let missing = parser.parse("inline", r#"{"services":[]}"#);
        assert!(matches!(missing, Err(LoadError::UnsupportedSchema { .. })));
    }

    #[test]
    fn invalid_json_is_reported() {
        let parser = DocumentParser::new().unwrap();
        assert!(matches!(
            parser.parse("inline", "not-json"),
            Err(LoadError::InvalidJson { .. })
        ));
    }

    #[test]
    fn meta_schema_rejects_bad_identifiers_and_unknown_keys() {
        let parser = DocumentParser::new().unwrap();
        let bad_identifier = r#"{
            "$schema": "http://api.nexus/draft-01/schema#",
            "services": [{ "identifier": "9bad", "operations": [] }]
        }"#;
        assert!(matches!(
            parser.parse("inline", bad_identifier),
            Err(LoadError::InvalidDocument { .. })
        ));

        let unknown_key = r#"{
            "$schema": "http://api.nexus/draft-01/schema#",
            "services": [],
            "extras": {}
        }"#;
        assert!(matches!(
            parser.parse("inline", unknown_key),
            Err(LoadError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn property_kind_splits_null() {
        let nullable = PropertyKind::Many(vec!["string".into(), "null".into()]);
        assert_eq!(nullable.split(), (Some("string"), true));
        assert_eq!(PropertyKind::One("integer".into()).split(), (Some("integer"), false));
        assert!(!nullable.is_union());
        assert!(PropertyKind::Many(vec!["string".into(), "integer".into()]).is_union());
    }

    #[test]
    fn type_refs_accept_pointer_or_bare_name() {
        assert_eq!(type_name_from_ref("#/types/Person"), Some("Person"));
        assert_eq!(type_name_from_ref("Person"), Some("Person"));
        assert_eq!(type_name_from_ref("#/definitions/Person"), None);
        assert_eq!(type_name_from_ref("#/types/"), None);
    }
}
