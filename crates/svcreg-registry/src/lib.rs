//! Operation and service descriptors, and the registry that binds them.
//!
//! An [`OperationDescriptor`] ties a wire name to optional input and output
//! schemas. A [`ServiceDescriptor`] groups operations under one name and
//! rejects collisions. The [`Registry`] collects services during startup;
//! once sealed it is read-only and [`Registry::resolve`] is the single entry
//! point used by a dispatcher. [`Dispatcher`] is a reference, in-process
//! implementation of that dispatcher contract.

pub mod dispatch;
pub mod error;
pub mod operation;
pub mod registry;
pub mod service;

pub use dispatch::{Dispatcher, Handler, HandlerError, HandlerResult, Reply};
pub use error::{DispatchError, RegistryError, ResolveError, Result};
pub use operation::{
    validate_identifier, validate_wire_name, OperationBuilder, OperationDescriptor, OperationShape,
};
pub use registry::Registry;
pub use service::ServiceDescriptor;
