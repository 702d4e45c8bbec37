use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use svcreg_registry::{validate_identifier, OperationDescriptor, Registry, ServiceDescriptor};
use svcreg_schema::{decode_value, Field, FieldType, SchemaType};

use crate::config::LoaderConfig;
use crate::document::{
    type_name_from_ref, Document, DocumentParser, PropertyDef, PropertyKind, ServiceDef, TypeDef,
};
use crate::error::{LoadError, Result};

/// File name suffix picked up by [`Loader::add_directory`].
pub const DOCUMENT_SUFFIX: &str = ".services.json";

/// Collects definition documents and builds them into a [`Registry`].
///
/// Types share one namespace across every document added to the same
/// loader, so a service in one file may reference a type from another.
pub struct Loader {
    config: LoaderConfig,
    parser: DocumentParser,
    documents: Vec<(String, Document)>,
}

impl Loader {
    /// Create an empty loader with default config.
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::default())
    }

    /// Create an empty loader with explicit config.
    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        Ok(Self {
            config,
            parser: DocumentParser::new()?,
            documents: Vec::new(),
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Add a document from a JSON string. `origin` names it in errors.
    pub fn add_str(&mut self, origin: &str, content: &str) -> Result<()> {
        let document = self.parser.parse(origin, content)?;
        self.push(origin, document);
        Ok(())
    }

    /// Add an already-parsed JSON document.
    pub fn add_value(&mut self, origin: &str, value: JsonValue) -> Result<()> {
        let document = self.parser.parse_value(origin, value)?;
        self.push(origin, document);
        Ok(())
    }

    /// Add one document file, whatever its name.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let content = read_document(path, self.config.max_document_size, None)?;
        self.add_str(&path.display().to_string(), &content)
    }

    /// Add every `*.services.json` file in `path`, in file name order.
    ///
    /// Symlinked documents are refused. Returns the number of documents added.
    pub fn add_directory(&mut self, path: &Path) -> Result<usize> {
        let entries = std::fs::read_dir(path)
            .map_err(|err| LoadError::LoadFailed(format!("{}: {err}", path.display())))?;

        let mut candidates: Vec<(String, PathBuf, std::fs::Metadata)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| LoadError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !is_document_file_name(&file_name) {
                continue;
            }

            let entry_path = entry.path();
            let path_metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| LoadError::LoadFailed(err.to_string()))?;
            let file_type = path_metadata.file_type();
            if file_type.is_symlink() {
                return Err(LoadError::LoadFailed(format!(
                    "refusing to load definition symlink: {file_name}"
                )));
            }
            if !file_type.is_file() {
                continue;
            }

            candidates.push((file_name, entry_path, path_metadata));
        }

        if candidates.len() > self.config.max_documents_from_directory {
            return Err(LoadError::LoadFailed(format!(
                "definition count exceeds configured max ({}): {}",
                self.config.max_documents_from_directory,
                candidates.len()
            )));
        }

        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        let count = candidates.len();
        for (_, entry_path, path_metadata) in candidates {
            let content = read_document(
                &entry_path,
                self.config.max_document_size,
                Some(&path_metadata),
            )?;
            self.add_str(&entry_path.display().to_string(), &content)?;
        }

        tracing::debug!(path = %path.display(), documents = count, "definition directory loaded");
        Ok(count)
    }

    /// Add a file or a directory. Returns the number of documents added.
    pub fn add_path(&mut self, path: &Path) -> Result<usize> {
        if path.is_dir() {
            self.add_directory(path)
        } else {
            self.add_file(path).map(|()| 1)
        }
    }

    /// Resolve every type and build an unsealed registry.
    ///
    /// Types are built even when no operation references them, so a broken
    /// type definition fails the load.
    pub fn build(self) -> Result<Registry> {
        let mut definitions: IndexMap<&str, (&str, &TypeDef)> = IndexMap::new();
        for (origin, document) in &self.documents {
            for (name, def) in &document.types {
                if let Some((first, _)) = definitions.get(name.as_str()) {
                    return Err(LoadError::DuplicateType {
                        name: name.clone(),
                        first: (*first).to_string(),
                        second: origin.clone(),
                    });
                }
                definitions.insert(name.as_str(), (origin.as_str(), def));
            }
        }

        let mut resolver = TypeResolver::new(&definitions);
        for name in definitions.keys() {
            resolver.resolve(name)?;
        }

        let mut registry = Registry::new();
        for (origin, document) in &self.documents {
            for service_def in &document.services {
                registry.register_service(build_service(service_def, &mut resolver)?)?;
            }
            tracing::debug!(
                origin = %origin,
                services = document.services.len(),
                "definition registered"
            );
        }

        Ok(registry)
    }

    fn push(&mut self, origin: &str, document: Document) {
        tracing::debug!(
            origin,
            types = document.types.len(),
            services = document.services.len(),
            "definition parsed"
        );
        self.documents.push((origin.to_string(), document));
    }
}

/// Load files and directories into an unsealed registry with default config.
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Registry> {
    load_paths_with_config(paths, LoaderConfig::default())
}

/// Load files and directories into an unsealed registry with explicit config.
pub fn load_paths_with_config<P: AsRef<Path>>(
    paths: &[P],
    config: LoaderConfig,
) -> Result<Registry> {
    let mut loader = Loader::with_config(config)?;
    for path in paths {
        loader.add_path(path.as_ref())?;
    }
    loader.build()
}

fn build_service(def: &ServiceDef, resolver: &mut TypeResolver<'_>) -> Result<ServiceDescriptor> {
    validate_identifier("service identifier", &def.identifier)?;
    let mut service =
        ServiceDescriptor::new(def.service_name())?.with_doc(doc_or(&def.description, || {
            format!("Service for {}.", def.service_name())
        }));

    for op_def in &def.operations {
        let context = || format!("service {}, operation {}", def.service_name(), op_def.identifier);
        let input = match op_def.input.as_deref() {
            Some(reference) => Some(resolver.resolve_ref(reference, context)?),
            None => None,
        };
        let output = match op_def.output.as_deref() {
            Some(reference) => Some(resolver.resolve_ref(reference, context)?),
            None => None,
        };

        let wire_name = op_def.name.as_deref().unwrap_or(&op_def.identifier);
        let op = OperationDescriptor::builder(op_def.identifier.as_str())
            .wire_name(wire_name)
            .maybe_input(input)
            .maybe_output(output)
            .doc(doc_or(&op_def.description, || {
                format!("Operation for {wire_name}.")
            }))
            .build()?;
        service.register(op)?;
    }

    Ok(service)
}

/// Documents without a description get a generated one.
fn doc_or(description: &str, fallback: impl FnOnce() -> String) -> String {
    if description.trim().is_empty() {
        fallback()
    } else {
        description.to_string()
    }
}

/// Builds schemas from type definitions, memoizing shared types and
/// rejecting reference cycles.
struct TypeResolver<'a> {
    definitions: &'a IndexMap<&'a str, (&'a str, &'a TypeDef)>,
    built: HashMap<String, Arc<SchemaType>>,
    visiting: Vec<String>,
}

impl<'a> TypeResolver<'a> {
    fn new(definitions: &'a IndexMap<&'a str, (&'a str, &'a TypeDef)>) -> Self {
        Self {
            definitions,
            built: HashMap::new(),
            visiting: Vec::new(),
        }
    }

    fn resolve_ref(
        &mut self,
        reference: &str,
        context: impl FnOnce() -> String,
    ) -> Result<Arc<SchemaType>> {
        match type_name_from_ref(reference) {
            Some(name) if self.definitions.contains_key(name) => self.resolve(name),
            _ => Err(LoadError::UnknownType {
                reference: reference.to_string(),
                context: context(),
            }),
        }
    }

    fn resolve(&mut self, name: &str) -> Result<Arc<SchemaType>> {
        if let Some(schema) = self.built.get(name) {
            return Ok(Arc::clone(schema));
        }
        if let Some(pos) = self.visiting.iter().position(|visiting| visiting == name) {
            let mut cycle: Vec<&str> = self.visiting[pos..].iter().map(String::as_str).collect();
            cycle.push(name);
            return Err(LoadError::TypeCycle(cycle.join(" -> ")));
        }

        let definitions = self.definitions;
        let Some((_, def)) = definitions.get(name) else {
            return Err(LoadError::UnknownType {
                reference: name.to_string(),
                context: "type namespace".to_string(),
            });
        };

        for required in &def.required {
            if !def.properties.contains_key(required) {
                return Err(LoadError::InvalidType {
                    name: name.to_string(),
                    reason: format!("required property {required} is not declared"),
                });
            }
        }

        self.visiting.push(name.to_string());
        let mut builder = SchemaType::builder(name).doc(def.description.clone());
        for (prop_name, prop) in &def.properties {
            let required = def.required.iter().any(|r| r == prop_name);
            builder = builder.field(self.field(name, prop_name, prop, required)?);
        }
        self.visiting.pop();

        let schema = builder.build()?;
        self.built.insert(name.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Properties that are neither required nor defaulted become nullable.
    fn field(
        &mut self,
        type_name: &str,
        prop_name: &str,
        prop: &PropertyDef,
        required: bool,
    ) -> Result<Field> {
        let mut ty = self.property_type(type_name, prop_name, prop)?;
        if !required && prop.default.is_none() {
            ty = FieldType::optional(ty);
        }

        let mut field = Field::new(prop_name, ty).with_doc(prop.description.clone());
        if let Some(raw) = &prop.default {
            let value = decode_value(field.field_type(), raw).map_err(|errors| {
                LoadError::InvalidType {
                    name: type_name.to_string(),
                    reason: format!("default for property {prop_name}: {errors}"),
                }
            })?;
            field = field.with_default(value);
        }
        Ok(field)
    }

    fn property_type(
        &mut self,
        type_name: &str,
        prop_name: &str,
        prop: &PropertyDef,
    ) -> Result<FieldType> {
        let invalid = |reason: String| LoadError::InvalidType {
            name: type_name.to_string(),
            reason,
        };

        if prop.kind.as_ref().is_some_and(PropertyKind::is_union) {
            return Err(invalid(format!(
                "property {prop_name} lists more than one type besides null"
            )));
        }
        let (kind, listed_null) = prop
            .kind
            .as_ref()
            .map_or((None, false), |kind| kind.split());

        let ty = if let Some(reference) = &prop.reference {
            let schema = self.resolve_ref(reference, || {
                format!("property {prop_name} of type {type_name}")
            })?;
            FieldType::schema(schema)
        } else {
            match kind {
                Some("string") => FieldType::STRING,
                Some("integer") => FieldType::INTEGER,
                Some("number") => FieldType::NUMBER,
                Some("boolean") => FieldType::BOOLEAN,
                Some("array") => {
                    let items = prop.items.as_deref().ok_or_else(|| {
                        invalid(format!("array property {prop_name} requires items"))
                    })?;
                    FieldType::list(self.property_type(type_name, prop_name, items)?)
                }
                Some(other) => {
                    return Err(invalid(format!(
                        "unsupported type {other} for property {prop_name}"
                    )));
                }
                None => {
                    return Err(invalid(format!(
                        "property {prop_name} needs a type or $ref"
                    )));
                }
            }
        };

        if prop.nullable || listed_null {
            Ok(FieldType::optional(ty))
        } else {
            Ok(ty)
        }
    }
}

fn is_document_file_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(DOCUMENT_SUFFIX)
}

fn read_document(
    path: &Path,
    max_bytes: usize,
    expected: Option<&std::fs::Metadata>,
) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|err| {
        LoadError::LoadFailed(format!("failed opening definition {}: {err}", path.display()))
    })?;
    let opened_metadata = file
        .metadata()
        .map_err(|err| LoadError::LoadFailed(err.to_string()))?;

    #[cfg(unix)]
    {
        if let Some(expected) = expected {
            if !same_file_identity(expected, &opened_metadata) {
                return Err(LoadError::LoadFailed(format!(
                    "definition file changed during load: {}",
                    path.display()
                )));
            }
        }
    }
    #[cfg(not(unix))]
    let _ = expected;

    if opened_metadata.len() > max_bytes as u64 {
        return Err(LoadError::LoadFailed(format!(
            "definition file too large ({} bytes): {}",
            opened_metadata.len(),
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            LoadError::LoadFailed(format!(
                "failed reading definition {}: {err}",
                path.display()
            ))
        })?;
    if content.len() > max_bytes {
        return Err(LoadError::LoadFailed(format!(
            "definition file too large while reading: {}",
            path.display()
        )));
    }

    Ok(content)
}

#[cfg(unix)]
fn same_file_identity(
    path_metadata: &std::fs::Metadata,
    opened_metadata: &std::fs::Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    path_metadata.dev() == opened_metadata.dev() && path_metadata.ino() == opened_metadata.ino()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use svcreg_registry::RegistryError;
    use svcreg_schema::{Value, ValidatorConfig};

    use super::*;

    const PEOPLE: &str = r##"{
        "$schema": "http://api.nexus/draft-01/schema#",
        "types": {
            "Address": {
                "properties": {
                    "city": { "type": "string" },
                    "zip": { "type": "string", "default": "00000" }
                },
                "required": ["city"]
            },
            "Person": {
                "description": "A person.",
                "properties": {
                    "id": { "type": "string" },
                    "nickname": { "type": ["string", "null"] },
                    "scores": { "type": "array", "items": { "type": "integer" } },
                    "home": { "$ref": "#/types/Address" }
                },
                "required": ["id", "nickname", "scores"]
            }
        },
        "services": [{
            "identifier": "People",
            "name": "directory.People",
            "description": "People directory.",
            "operations": [
                { "identifier": "find", "name": "Find Person", "input": "Address", "output": "#/types/Person" },
                { "identifier": "reset" }
            ]
        }]
    }"##;

    fn doc(types: JsonValue, services: JsonValue) -> JsonValue {
        json!({
            "$schema": "http://api.nexus/draft-01/schema#",
            "types": types,
            "services": services,
        })
    }

    #[test]
    fn builds_services_operations_and_types() {
        let mut loader = Loader::new().unwrap();
        loader.add_str("people", PEOPLE).unwrap();
        let registry = loader.build().unwrap();

        let service = registry.service("directory.People").unwrap();
        assert_eq!(service.doc(), "People directory.");

        let find = registry.resolve("directory.People", "Find Person").unwrap();
        assert_eq!(find.code_name(), "find");
        assert_eq!(find.input_schema().unwrap().name(), "Address");

        let person = find.output_schema().unwrap();
        let names: Vec<&str> = person.fields().map(Field::name).collect();
        assert_eq!(names, vec!["id", "nickname", "scores", "home"]);
        assert!(person.field("id").unwrap().is_required());
        assert!(person.field("nickname").unwrap().field_type().is_nullable());
        assert!(person.field("home").unwrap().is_optional());

        let reset = registry.resolve("directory.People", "reset").unwrap();
        assert!(!reset.accepts_input());
        assert!(!reset.produces_output());
    }

    #[test]
    fn missing_descriptions_get_generated_docs() {
        let mut loader = Loader::new().unwrap();
        loader
            .add_value(
                "inline",
                doc(
                    json!({}),
                    json!([{ "identifier": "Jobs", "operations": [
                        { "identifier": "run", "name": "Run Job" },
                        { "identifier": "stop", "description": "Stop everything." }
                    ] }]),
                ),
            )
            .unwrap();
        let registry = loader.build().unwrap();

        assert_eq!(registry.service("Jobs").unwrap().doc(), "Service for Jobs.");
        assert_eq!(
            registry.resolve("Jobs", "Run Job").unwrap().doc(),
            "Operation for Run Job."
        );
        assert_eq!(registry.resolve("Jobs", "stop").unwrap().doc(), "Stop everything.");
    }

    #[test]
    fn shared_types_are_built_once() {
        let mut loader = Loader::new().unwrap();
        loader.add_str("people", PEOPLE).unwrap();
        let registry = loader.build().unwrap();

        let find = registry.resolve("directory.People", "Find Person").unwrap();
        let input = find.input_schema().unwrap();
        let nested = match find.output_schema().unwrap().field("home").unwrap().field_type() {
            FieldType::Optional(inner) => match inner.as_ref() {
                FieldType::Schema(schema) => Arc::clone(schema),
                other => panic!("unexpected type {other}"),
            },
            other => panic!("unexpected type {other}"),
        };
        assert!(Arc::ptr_eq(input, &nested));
    }

    #[test]
    fn defaults_are_applied_on_validation() {
        let mut loader = Loader::new().unwrap();
        loader.add_str("people", PEOPLE).unwrap();
        let registry = loader.build().unwrap();

        let find = registry.resolve("directory.People", "Find Person").unwrap();
        let instance = find
            .input_validator(ValidatorConfig::default())
            .unwrap()
            .validate(&json!({"city": "Delft"}))
            .unwrap();
        assert_eq!(instance.get("zip"), Some(&Value::String("00000".into())));
    }

    #[test]
    fn unknown_type_reference_names_context() {
        let mut loader = Loader::new().unwrap();
        loader
            .add_value(
                "inline",
                doc(
                    json!({}),
                    json!([{ "identifier": "Svc", "operations": [{ "identifier": "op", "input": "#/types/Missing" }] }]),
                ),
            )
            .unwrap();

        let err = loader.build().err().unwrap();
        assert_eq!(
            err.to_string(),
            "could not find type #/types/Missing for service Svc, operation op"
        );
    }

    #[test]
    fn type_cycles_are_rejected() {
        let mut loader = Loader::new().unwrap();
        loader
            .add_value(
                "inline",
                doc(
                    json!({
                        "A": { "properties": { "b": { "$ref": "B" } } },
                        "B": { "properties": { "a": { "$ref": "#/types/A" } } }
                    }),
                    json!([]),
                ),
            )
            .unwrap();

        match loader.build() {
            Err(LoadError::TypeCycle(path)) => assert_eq!(path, "A -> B -> A"),
            other => panic!("expected cycle, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn duplicate_types_across_documents_are_rejected() {
        let types = json!({ "Shared": { "properties": { "x": { "type": "string" } } } });
        let mut loader = Loader::new().unwrap();
        loader.add_value("one", doc(types.clone(), json!([]))).unwrap();
        loader.add_value("two", doc(types, json!([]))).unwrap();

        assert!(matches!(
            loader.build(),
            Err(LoadError::DuplicateType { first, second, .. }) if first == "one" && second == "two"
        ));
    }

    #[test]
    fn types_resolve_across_documents() {
        let mut loader = Loader::new().unwrap();
        loader
            .add_value(
                "types",
                doc(json!({ "Ping": { "properties": { "seq": { "type": "integer" } }, "required": ["seq"] } }), json!([])),
            )
            .unwrap();
        loader
            .add_value(
                "services",
                doc(json!({}), json!([{ "identifier": "Health", "operations": [{ "identifier": "ping", "input": "Ping" }] }])),
            )
            .unwrap();

        let registry = loader.build().unwrap();
        assert_eq!(
            registry.resolve("Health", "ping").unwrap().input_schema().unwrap().name(),
            "Ping"
        );
    }

    #[test]
    fn duplicate_wire_names_fail_the_load() {
        let mut loader = Loader::new().unwrap();
        loader
            .add_value(
                "inline",
                doc(
                    json!({}),
                    json!([{ "identifier": "Svc", "operations": [
                        { "identifier": "a", "name": "Same" },
                        { "identifier": "b", "name": "Same" }
                    ] }]),
                ),
            )
            .unwrap();

        assert!(matches!(
            loader.build(),
            Err(LoadError::Registry(RegistryError::DuplicateOperation { .. }))
        ));
    }

    #[test]
    fn invalid_properties_are_reported() {
        let cases = [
            json!({ "T": { "properties": { "x": { "type": "array" } } } }),
            json!({ "T": { "properties": { "x": { "description": "untyped" } } } }),
            json!({ "T": { "properties": { "x": { "type": "integer", "default": "one" } } } }),
            json!({ "T": { "properties": {}, "required": ["ghost"] } }),
            json!({ "T": { "properties": { "x": { "type": ["string", "integer"] } } } }),
        ];
        for types in cases {
            let mut loader = Loader::new().unwrap();
            loader.add_value("inline", doc(types, json!([]))).unwrap();
            assert!(matches!(loader.build(), Err(LoadError::InvalidType { .. })));
        }
    }

    #[test]
    fn directory_loads_documents_in_name_order() {
        let dir = make_temp_dir("directory");
        write_document(
            &dir,
            "b.services.json",
            &doc(json!({}), json!([{ "identifier": "Second", "operations": [] }])).to_string(),
        );
        write_document(
            &dir,
            "a.services.json",
            &doc(json!({}), json!([{ "identifier": "First", "operations": [] }])).to_string(),
        );
        write_document(&dir, "notes.json", "not a definition");

        let mut loader = Loader::new().unwrap();
        assert_eq!(loader.add_directory(&dir).unwrap(), 2);
        let registry = loader.build().unwrap();
        let names: Vec<&str> = registry.services().map(ServiceDescriptor::name).collect();
        assert_eq!(names, vec!["First", "Second"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn document_count_limit_is_enforced() {
        let dir = make_temp_dir("count-limit");
        let content = doc(json!({}), json!([])).to_string();
        write_document(&dir, "a.services.json", &content);
        write_document(&dir, "b.services.json", &content);

        let mut loader = Loader::with_config(LoaderConfig {
            max_documents_from_directory: 1,
            ..LoaderConfig::default()
        })
        .unwrap();
        assert!(matches!(
            loader.add_directory(&dir),
            Err(LoadError::LoadFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn document_size_limit_is_enforced() {
        let dir = make_temp_dir("size-limit");
        write_document(&dir, "a.services.json", &doc(json!({}), json!([])).to_string());

        let config = LoaderConfig {
            max_document_size: 8,
            ..LoaderConfig::default()
        };
        let result = load_paths_with_config(&[&dir], config);
        assert!(matches!(result, Err(LoadError::LoadFailed(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_document_is_rejected() {
        let dir = make_temp_dir("symlink");
        let target = dir.join("target.json");
        std::fs::write(&target, doc(json!({}), json!([])).to_string()).unwrap();
        std::os::unix::fs::symlink(&target, dir.join("linked.services.json")).unwrap();

        let mut loader = Loader::new().unwrap();
        assert!(matches!(
            loader.add_directory(&dir),
            Err(LoadError::LoadFailed(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_path_fails_to_load() {
        let dir = make_temp_dir("missing");
        let result = load_paths(&[dir.join("absent.services.json")]);
        assert!(matches!(result, Err(LoadError::LoadFailed(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    fn make_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "svcreg-idl-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_document(dir: &Path, file_name: &str, contents: &str) {
        std::fs::write(dir.join(file_name), contents.as_bytes()).unwrap();
    }
}
