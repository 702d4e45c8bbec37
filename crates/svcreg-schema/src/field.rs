use std::fmt;
use std::sync::Arc;

use crate::schema::SchemaType;
use crate::value::Value;

/// Scalar field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(Primitive),
    /// A nested message, shared with every other field that uses it.
    Schema(Arc<SchemaType>),
    List(Box<FieldType>),
    /// Nullable wrapper; `null` (absent) is a legal value.
    Optional(Box<FieldType>),
}

impl FieldType {
    pub const STRING: FieldType = FieldType::Primitive(Primitive::String);
    pub const INTEGER: FieldType = FieldType::Primitive(Primitive::Integer);
    pub const NUMBER: FieldType = FieldType::Primitive(Primitive::Number);
    pub const BOOLEAN: FieldType = FieldType::Primitive(Primitive::Boolean);

    pub fn schema(schema: Arc<SchemaType>) -> Self {
        FieldType::Schema(schema)
    }

    pub fn list(item: FieldType) -> Self {
        FieldType::List(Box::new(item))
    }

    /// Wraps `inner` as nullable. Already-nullable types are returned unchanged.
    pub fn optional(inner: FieldType) -> Self {
        if inner.is_nullable() {
            inner
        } else {
            FieldType::Optional(Box::new(inner))
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(primitive) => f.write_str(primitive.as_str()),
            FieldType::Schema(schema) => f.write_str(schema.name()),
            FieldType::List(item) => write!(f, "list<{item}>"),
            FieldType::Optional(inner) => write!(f, "optional<{inner}>"),
        }
    }
}

/// One named, typed field of a [`SchemaType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) ty: FieldType,
    pub(crate) default: Option<Value>,
    pub(crate) doc: String,
}

impl Field {
    /// A field of type `ty`. Required unless `ty` is optional or a default is set.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            doc: String::new(),
        }
    }

    /// A nullable field whose default is null.
    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, FieldType::optional(ty))
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// The explicitly declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.ty.is_nullable()
    }

    pub fn is_required(&self) -> bool {
        !self.is_optional()
    }

    /// The value used when the field is absent: the declared default, else
    /// null for nullable fields, else nothing.
    pub fn effective_default(&self) -> Option<Value> {
        match &self.default {
            Some(value) => Some(value.clone()),
            None if self.ty.is_nullable() => Some(Value::Null),
            None => None,
        }
    }
}
