use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{RegistryError, ResolveError, Result};
use crate::operation::OperationDescriptor;
use crate::service::ServiceDescriptor;

/// Process-wide namespace of services.
///
/// Services are registered during startup, then the registry is sealed and
/// shared (typically as `Arc<Registry>`) for lock-free concurrent reads.
#[derive(Debug, Default)]
pub struct Registry {
    services: IndexMap<String, ServiceDescriptor>,
    sealed: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service. Fails if the registry is sealed or the name is taken;
    /// on failure the registry is unchanged.
    pub fn register_service(&mut self, service: ServiceDescriptor) -> Result<()> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        if self.services.contains_key(service.name()) {
            return Err(RegistryError::DuplicateService(service.name().to_string()));
        }

        tracing::debug!(
            service = service.name(),
            operations = service.len(),
            "service registered"
        );
        self.services.insert(service.name().to_string(), service);
        Ok(())
    }

    /// Chaining form of [`Registry::register_service`].
    pub fn with_service(mut self, service: ServiceDescriptor) -> Result<Self> {
        self.register_service(service)?;
        Ok(self)
    }

    /// End the build phase. Idempotent.
    pub fn seal(&mut self) {
        if !self.sealed {
            tracing::debug!(
                services = self.services.len(),
                operations = self.operation_count(),
                "registry sealed"
            );
        }
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Seal and wrap for sharing with dispatchers.
    pub fn into_shared(mut self) -> Arc<Self> {
        self.seal();
        Arc::new(self)
    }

    /// Turn an incoming (service, wire operation) pair into its descriptor.
    pub fn resolve(
        &self,
        service: &str,
        wire_operation: &str,
    ) -> std::result::Result<&OperationDescriptor, ResolveError> {
        let descriptor = self
            .services
            .get(service)
            .ok_or_else(|| ResolveError::UnknownService(service.to_string()))?;
        descriptor
            .lookup(wire_operation)
            .ok_or_else(|| ResolveError::UnknownOperation {
                service: service.to_string(),
                operation: wire_operation.to_string(),
            })
    }

    pub fn service(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.get(name)
    }

    /// Services in registration order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Total number of operations across all services.
    pub fn operation_count(&self) -> usize {
        self.services.values().map(ServiceDescriptor::len).sum()
    }
}
