//! Plugin loading errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed plugin manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    #[error("plugin '{plugin}' does not provide operation '{operation}'")]
    UnknownOperation { plugin: String, operation: String },
}
