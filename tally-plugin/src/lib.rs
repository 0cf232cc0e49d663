//! Tally Plugin System
//!
//! Provides the pieces for extending Tally with operations:
//! - `Operation`: an arity-tagged callable
//! - `Plugin`: a unit contributing operations
//! - `OperationRegistry`: the name to operation map used for dispatch
//! - `PluginCatalog` / `PluginLoader`: discovery and merging

mod error;
mod loader;
mod registry;
mod traits;

pub use error::PluginError;
pub use loader::{LoadReport, Override, PluginCatalog, PluginLoader, PluginManifest, PluginOutcome};
pub use registry::{OperationRegistry, RegisteredOperation, BUILTIN_ORIGIN};
pub use traits::{Arity, BinaryFn, Operation, OperationDef, OperationMeta, Plugin, PluginMeta, UnaryFn};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        Arity, Operation, OperationDef, OperationMeta, OperationRegistry, Plugin, PluginMeta,
    };
    pub use tally_core::prelude::*;
}
