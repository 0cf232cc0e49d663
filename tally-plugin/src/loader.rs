//! Plugin discovery and loading
//!
//! Plugins are compiled in and collected in a [`PluginCatalog`]. A plugin
//! directory holds one JSON manifest per plugin to enable:
//!
//! ```json
//! { "plugin": "sci", "enabled": true, "operations": ["sqrt"] }
//! ```
//!
//! Manifests are applied in file-name order. Each one yields its own
//! outcome, so a broken manifest never stops the others from loading.

use crate::{OperationRegistry, Plugin, PluginError};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Statically linked plugin units
#[derive(Default)]
pub struct PluginCatalog {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn with_plugin<P: Plugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.meta().name.eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.meta().name).collect()
    }
}

fn default_enabled() -> bool {
    true
}

/// Contents of one manifest file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    pub plugin: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Restrict loading to these operations
    #[serde(default)]
    pub operations: Option<Vec<String>>,
}

impl PluginManifest {
    pub fn for_plugin(name: impl Into<String>) -> Self {
        Self {
            plugin: name.into(),
            enabled: true,
            operations: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, PluginError> {
        let text = fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PluginError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// An operation that replaced an earlier definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub operation: String,
    pub previous_origin: String,
}

#[derive(Debug)]
pub enum PluginOutcome {
    Loaded {
        operations: Vec<String>,
        overridden: Vec<Override>,
    },
    Disabled,
    Failed(PluginError),
}

impl PluginOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, PluginOutcome::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PluginOutcome::Failed(_))
    }
}

/// Per-plugin results of a load pass
#[derive(Debug, Default)]
pub struct LoadReport {
    entries: Vec<(String, PluginOutcome)>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, plugin: impl Into<String>, outcome: PluginOutcome) {
        self.entries.push((plugin.into(), outcome));
    }

    pub fn entries(&self) -> &[(String, PluginOutcome)] {
        &self.entries
    }

    pub fn outcome(&self, plugin: &str) -> Option<&PluginOutcome> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == plugin)
            .map(|(_, outcome)| outcome)
    }

    /// Names of plugins that loaded
    pub fn loaded(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, o)| o.is_loaded())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn failures(&self) -> Vec<(&str, &PluginError)> {
        self.entries
            .iter()
            .filter_map(|(name, o)| match o {
                PluginOutcome::Failed(e) => Some((name.as_str(), e)),
                _ => None,
            })
            .collect()
    }

    pub fn overrides(&self) -> Vec<&Override> {
        self.entries
            .iter()
            .flat_map(|(_, o)| match o {
                PluginOutcome::Loaded { overridden, .. } => overridden.iter(),
                _ => [].iter(),
            })
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        !self.entries.iter().any(|(_, o)| o.is_failed())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merges catalog plugins into a registry
pub struct PluginLoader<'a> {
    catalog: &'a PluginCatalog,
}

impl<'a> PluginLoader<'a> {
    pub fn new(catalog: &'a PluginCatalog) -> Self {
        Self { catalog }
    }

    /// Load every plugin in the catalog, in catalog order
    pub fn load_all(&self, registry: &mut OperationRegistry) -> LoadReport {
        let mut report = LoadReport::new();
        for name in self.catalog.names() {
            let outcome = self.apply(&PluginManifest::for_plugin(name), registry);
            report.push(name, outcome);
        }
        report
    }

    /// Load the plugins enabled by manifests in `dir`.
    ///
    /// A missing directory is not an error and yields an empty report. Only
    /// a directory that exists but cannot be listed returns `Err`.
    pub fn load_plugins(
        &self,
        dir: &Path,
        registry: &mut OperationRegistry,
    ) -> Result<LoadReport, PluginError> {
        let mut report = LoadReport::new();
        let manifests = match manifest_paths(dir) {
            Ok(paths) => paths,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(dir = %dir.display(), "plugin directory not found, no plugins loaded");
                return Ok(report);
            }
            Err(source) => {
                return Err(PluginError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        for path in manifests {
            match PluginManifest::from_path(&path) {
                Ok(manifest) => {
                    let outcome = self.apply(&manifest, registry);
                    report.push(manifest.plugin, outcome);
                }
                Err(e) => {
                    warn!(manifest = %path.display(), error = %e, "skipping plugin manifest");
                    report.push(manifest_stem(&path), PluginOutcome::Failed(e));
                }
            }
        }
        Ok(report)
    }

    fn apply(&self, manifest: &PluginManifest, registry: &mut OperationRegistry) -> PluginOutcome {
        if !manifest.enabled {
            info!(plugin = %manifest.plugin, "plugin disabled by manifest");
            return PluginOutcome::Disabled;
        }
        let plugin = match self.catalog.get(&manifest.plugin) {
            Some(p) => p,
            None => {
                let e = PluginError::UnknownPlugin(manifest.plugin.clone());
                warn!(error = %e, "plugin failed to load");
                return PluginOutcome::Failed(e);
            }
        };
        let origin = plugin.meta().name;
        let mut defs = plugin.operations();

        // Check the whole selection first so a plugin loads fully or not at all
        if let Some(wanted) = &manifest.operations {
            for op in wanted {
                if !defs.iter().any(|d| d.meta.name.eq_ignore_ascii_case(op)) {
                    let e = PluginError::UnknownOperation {
                        plugin: origin.to_string(),
                        operation: op.clone(),
                    };
                    warn!(error = %e, "plugin failed to load");
                    return PluginOutcome::Failed(e);
                }
            }
            defs.retain(|d| wanted.iter().any(|op| d.meta.name.eq_ignore_ascii_case(op)));
        }

        let mut operations = Vec::with_capacity(defs.len());
        let mut overridden = Vec::new();
        for def in defs {
            let name = def.meta.name.to_lowercase();
            if let Some(previous_origin) = registry.register(origin, def) {
                overridden.push(Override {
                    operation: name.clone(),
                    previous_origin,
                });
            }
            operations.push(name);
        }
        info!(plugin = %origin, operations = ?operations, "plugin loaded");
        PluginOutcome::Loaded { operations, overridden }
    }
}

fn manifest_paths(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn manifest_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
