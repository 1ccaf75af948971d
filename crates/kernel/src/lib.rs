//! Kernel of the bookstore service: layered settings and the module lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, SchemaDefinition};
pub use registry::ModuleRegistry;
