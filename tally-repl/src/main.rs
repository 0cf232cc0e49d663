//! Tally REPL
//!
//! Startup order: configuration, logging, calculator (built-ins plus
//! plugins), saved history, then the read-eval-print loop on stdin.
//!
//! ```bash
//! # Defaults: history.csv, tally.log, every bundled plugin
//! tally
//!
//! # Enable plugins from manifests and fail on a broken one
//! tally --plugin-dir plugins --strict-plugins
//!
//! # Same, through the environment
//! PLUGIN_DIR=plugins LOG_LEVEL=debug tally
//! ```

mod command;
mod config;
mod session;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tally::{Calculator, LoadReport};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::session::Session;

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_new(config.log_directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Build the calculator described by `config` and load saved history.
///
/// Plugin failures are reported on stderr and tolerated, unless
/// `strict_plugins` is set: then a missing plugin directory or any failed
/// plugin aborts startup.
fn startup(config: &Config) -> Result<(Calculator, LoadReport)> {
    let mut builder = Calculator::builder().with_history(config.history());
    if let Some(dir) = &config.plugin_dir {
        if config.strict_plugins && !dir.is_dir() {
            bail!("plugin directory {} not found", dir.display());
        }
        builder = builder.with_plugin_dir(dir);
    }
    let (mut calc, report) = builder.build().context("failed to load plugins")?;

    for (plugin, e) in report.failures() {
        error!(plugin = %plugin, error = %e, "plugin unavailable");
        eprintln!("Warning: plugin '{}' unavailable: {}", plugin, e);
    }
    if config.strict_plugins && !report.is_clean() {
        bail!("{} plugin(s) failed to load", report.failures().len());
    }
    for o in report.overrides() {
        eprintln!(
            "Warning: operation '{}' from {} was overridden",
            o.operation, o.previous_origin
        );
    }

    calc.load_history()
        .with_context(|| format!("failed to load history from {}", config.history_file.display()))?;
    Ok((calc, report))
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let (calc, _) = startup(&config)?;
    info!(history = %config.history_file.display(), "Calculator REPL started.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(calc, stdout.lock());
    session.banner()?;
    session.run(stdin.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> Config {
        Config {
            history_file: dir.join("history.csv"),
            log_file: dir.join("tally.log"),
            log_level: "info".to_string(),
            plugin_dir: None,
            strict_plugins: false,
        }
    }

    fn plugin_dir_with(dir: &Path, manifests: &[(&str, &str)]) -> std::path::PathBuf {
        let plugins = dir.join("plugins");
        fs::create_dir(&plugins).unwrap();
        for (name, body) in manifests {
            fs::write(plugins.join(name), body).unwrap();
        }
        plugins
    }

    #[test]
    fn test_startup_loads_bundled_plugins() {
        let tmp = tempfile::tempdir().unwrap();
        let (calc, report) = startup(&config_in(tmp.path())).unwrap();
        assert_eq!(report.loaded(), vec!["sci"]);
        assert!(calc.registry().contains("sqrt"));
        assert!(calc.get_history().is_empty());
    }

    #[test]
    fn test_strict_rejects_broken_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.plugin_dir = Some(plugin_dir_with(
            tmp.path(),
            &[("sci.json", r#"{"plugin": "sci"}"#), ("broken.json", "{")],
        ));

        let (calc, report) = startup(&config).unwrap();
        assert_eq!(report.failures().len(), 1);
        assert!(calc.registry().contains("sqrt"));

        config.strict_plugins = true;
        let err = startup(&config).err().unwrap();
        assert_eq!(err.to_string(), "1 plugin(s) failed to load");
    }

    #[test]
    fn test_strict_rejects_missing_plugin_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.plugin_dir = Some(tmp.path().join("no-such-dir"));

        let (calc, report) = startup(&config).unwrap();
        assert!(report.is_empty());
        assert!(!calc.registry().contains("sqrt"));

        config.strict_plugins = true;
        let err = startup(&config).err().unwrap();
        assert!(err.to_string().contains("not found"), "{}", err);
    }

    #[test]
    fn test_strict_accepts_clean_plugin_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.plugin_dir = Some(plugin_dir_with(tmp.path(), &[("sci.json", r#"{"plugin": "sci"}"#)]));
        config.strict_plugins = true;

        let (calc, report) = startup(&config).unwrap();
        assert!(report.is_clean());
        assert!(calc.registry().contains("ln"));
    }

    #[test]
    fn test_startup_loads_saved_history() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        fs::write(&config.history_file, "entry\n1 add 1 = 2\n").unwrap();

        let (calc, _) = startup(&config).unwrap();
        assert_eq!(calc.get_history(), vec!["1 add 1 = 2"]);
    }

    #[test]
    fn test_unreadable_history_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        fs::write(&config.history_file, "wrong\nx\n").unwrap();

        let err = startup(&config).err().unwrap();
        assert!(err.to_string().starts_with("failed to load history from"), "{}", err);
    }
}
