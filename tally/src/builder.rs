//! Calculator construction
//!
//! The registry can only be changed here. `build` runs plugin loading and
//! then freezes the registry inside the calculator.

use crate::Calculator;
use std::path::PathBuf;
use tally_history::HistoryConfig;
use tally_plugin::{LoadReport, OperationRegistry, PluginCatalog, PluginError, PluginLoader};
use tracing::info;

/// Plugins compiled into this build
pub fn bundled_catalog() -> PluginCatalog {
    PluginCatalog::new().with_plugin(tally_sci::SciPlugin)
}

pub struct CalculatorBuilder {
    registry: OperationRegistry,
    catalog: PluginCatalog,
    plugin_dir: Option<PathBuf>,
    history: HistoryConfig,
}

impl CalculatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: tally_std::builtin_registry(),
            catalog: bundled_catalog(),
            plugin_dir: None,
            history: HistoryConfig::default(),
        }
    }

    /// Start from a different base registry instead of the built-ins
    pub fn with_registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_catalog(mut self, catalog: PluginCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Enable plugins through the manifests in `dir` rather than loading
    /// the whole catalog
    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_dir = Some(dir.into());
        self
    }

    pub fn with_history(mut self, config: HistoryConfig) -> Self {
        self.history = config;
        self
    }

    pub fn build(self) -> Result<(Calculator, LoadReport), PluginError> {
        let Self {
            mut registry,
            catalog,
            plugin_dir,
            history,
        } = self;

        let loader = PluginLoader::new(&catalog);
        let report = match &plugin_dir {
            Some(dir) => loader.load_plugins(dir, &mut registry)?,
            None => loader.load_all(&mut registry),
        };
        Ok(finish(registry, history, report))
    }

    /// Load the whole catalog, ignoring any plugin directory.
    ///
    /// Infallible: per-plugin failures end up in the report.
    pub fn build_bundled(self) -> (Calculator, LoadReport) {
        let Self {
            mut registry,
            catalog,
            history,
            ..
        } = self;

        let report = PluginLoader::new(&catalog).load_all(&mut registry);
        finish(registry, history, report)
    }
}

fn finish(
    registry: OperationRegistry,
    history: HistoryConfig,
    report: LoadReport,
) -> (Calculator, LoadReport) {
    info!(
        operations = registry.len(),
        plugins = ?report.loaded(),
        failures = report.failures().len(),
        "calculator initialized"
    );
    (Calculator::new(registry, history), report)
}

impl Default for CalculatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
