//! Startup configuration
//!
//! Every setting can come from a flag or from the environment variable
//! named next to it.

use clap::Parser;
use std::path::PathBuf;
use tally::HistoryConfig;

pub const DEFAULT_LOG_FILE: &str = "tally.log";

/// Tally - calculator with plugins and undoable history
#[derive(Parser, Debug, Clone)]
#[command(name = "tally")]
#[command(about = "Interactive calculator with plugin support and persistent history")]
#[command(version)]
pub struct Config {
    /// CSV file history is saved to and loaded from
    #[arg(long, env = "HISTORY_FILE", default_value = tally::DEFAULT_HISTORY_FILE)]
    pub history_file: PathBuf,

    /// File log output is appended to
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log level or filter directive (e.g. INFO, debug, tally=trace)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Directory of plugin manifests; every bundled plugin loads when unset
    #[arg(long, env = "PLUGIN_DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Refuse to start if the plugin directory is missing or any plugin
    /// fails to load
    #[arg(long, env = "STRICT_PLUGINS", value_parser = clap::builder::FalseyValueParser::new())]
    pub strict_plugins: bool,
}

impl Config {
    pub fn history(&self) -> HistoryConfig {
        HistoryConfig::new(&self.history_file)
    }

    /// Filter directive for the log subscriber.
    ///
    /// Accepts the level names people tend to put in `.env` files
    /// (`WARNING`, `CRITICAL`) alongside tracing's own.
    pub fn log_directive(&self) -> String {
        let level = self.log_level.trim().to_lowercase();
        match level.as_str() {
            "warning" => "warn".to_string(),
            "critical" | "fatal" => "error".to_string(),
            _ => level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("tally").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--history-file",
            "h.csv",
            "--plugin-dir",
            "plugins",
            "--strict-plugins",
            "--log-level",
            "DEBUG",
        ]);
        assert_eq!(config.history(), HistoryConfig::new("h.csv"));
        assert_eq!(config.plugin_dir, Some(PathBuf::from("plugins")));
        assert!(config.strict_plugins);
        assert_eq!(config.log_directive(), "debug");
    }

    #[test]
    fn test_strict_plugins_from_env() {
        std::env::set_var("STRICT_PLUGINS", "1");
        assert!(parse(&[]).strict_plugins);
        std::env::set_var("STRICT_PLUGINS", "off");
        assert!(!parse(&[]).strict_plugins);
        std::env::remove_var("STRICT_PLUGINS");
        assert!(!parse(&[]).strict_plugins);
    }

    #[test]
    fn test_level_aliases() {
        assert_eq!(parse(&["--log-level", "WARNING"]).log_directive(), "warn");
        assert_eq!(parse(&["--log-level", "critical"]).log_directive(), "error");
    }
}
