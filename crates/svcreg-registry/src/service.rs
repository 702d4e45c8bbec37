use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{RegistryError, Result};
use crate::operation::{validate_wire_name, OperationDescriptor};

/// A named group of operations.
///
/// Operations are kept in registration order and indexed by wire name for
/// constant-time lookup. Once handed to a [`crate::Registry`] the service
/// is only reachable through shared references.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    name: String,
    doc: String,
    operations: IndexMap<String, OperationDescriptor>,
    wire_index: HashMap<String, usize>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_wire_name("service name", &name)?;
        Ok(Self {
            name,
            doc: String::new(),
            operations: IndexMap::new(),
            wire_index: HashMap::new(),
        })
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Add an operation. Fails if its code name or wire name is taken.
    pub fn register(&mut self, op: OperationDescriptor) -> Result<()> {
        if self.operations.contains_key(op.code_name()) {
            return Err(self.duplicate("code name", op.code_name()));
        }
        if self.wire_index.contains_key(op.wire_name()) {
            return Err(self.duplicate("wire name", op.wire_name()));
        }

        tracing::debug!(
            service = %self.name,
            operation = op.code_name(),
            wire_name = op.wire_name(),
            shape = op.shape().as_str(),
            "operation registered"
        );

        self.wire_index
            .insert(op.wire_name().to_string(), self.operations.len());
        self.operations.insert(op.code_name().to_string(), op);
        Ok(())
    }

    /// Chaining form of [`ServiceDescriptor::register`].
    pub fn with_operation(mut self, op: OperationDescriptor) -> Result<Self> {
        self.register(op)?;
        Ok(self)
    }

    /// Find an operation by wire name.
    pub fn lookup(&self, wire_name: &str) -> Option<&OperationDescriptor> {
        let idx = *self.wire_index.get(wire_name)?;
        self.operations.get_index(idx).map(|(_, op)| op)
    }

    /// Find an operation by code name.
    pub fn get(&self, code_name: &str) -> Option<&OperationDescriptor> {
        self.operations.get(code_name)
    }

    /// Operations in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn duplicate(&self, kind: &'static str, name: &str) -> RegistryError {
        RegistryError::DuplicateOperation {
            service: self.name.clone(),
            kind,
            name: name.to_string(),
        }
    }
}
