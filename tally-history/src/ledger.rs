//! The history ledger

use crate::{HistoryEntry, HistoryError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header of the single CSV column
pub const ENTRY_COLUMN: &str = "entry";

/// Default history file, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

impl HistoryConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

/// Ordered, undoable record of successful calculations
///
/// Entries are only ever appended, popped from the tail, or replaced
/// wholesale by `load_history` / `clear_history`.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    config: HistoryConfig,
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn add_to_history(&mut self, entry: impl Into<HistoryEntry>) {
        let entry = entry.into();
        debug!(entry = %entry, "history entry added");
        self.entries.push(entry);
    }

    pub fn get_history(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.as_str().to_string()).collect()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the newest entry; `None` when there is nothing to undo
    pub fn undo_last(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop();
        if let Some(e) = &entry {
            debug!(entry = %e, "history entry undone");
        }
        entry
    }

    /// Write all entries to the history file, replacing its contents
    pub fn save_history(&self) -> Result<(), HistoryError> {
        let path = self.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|source| self.csv_error(source))?;
        writer
            .write_record([ENTRY_COLUMN])
            .map_err(|source| self.csv_error(source))?;
        for entry in &self.entries {
            writer
                .write_record([entry.as_str()])
                .map_err(|source| self.csv_error(source))?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        info!(path = %path.display(), entries = self.entries.len(), "history saved");
        Ok(())
    }

    /// Replace in-memory entries with the file's; a missing file empties the ledger
    pub fn load_history(&mut self) -> Result<(), HistoryError> {
        let file = match File::open(self.path()) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path().display(), "no history file, starting empty");
                self.entries.clear();
                return Ok(());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let column = reader
            .headers()
            .map_err(|source| self.csv_error(source))?
            .iter()
            .position(|h| h.trim() == ENTRY_COLUMN)
            .ok_or_else(|| HistoryError::MissingColumn {
                path: self.config.path.clone(),
            })?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| self.csv_error(source))?;
            entries.push(HistoryEntry::new(record.get(column).unwrap_or_default()));
        }
        self.entries = entries;

        info!(path = %self.path().display(), entries = self.entries.len(), "history loaded");
        Ok(())
    }

    /// Empty the ledger and delete the history file if there is one
    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        match fs::remove_file(self.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(self.io_error(source)),
        }
        info!(path = %self.path().display(), "history cleared");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.config.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> HistoryError {
        HistoryError::Csv {
            path: self.config.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_in(dir: &Path) -> HistoryLedger {
        HistoryLedger::new(HistoryConfig::new(dir.join("test_history.csv")))
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let ledger = ledger_in(tmp.path());
        assert!(ledger.is_empty());
        assert!(ledger.get_history().is_empty());
    }

    #[test]
    fn test_add_to_history() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("1 + 1 = 2");
        assert_eq!(ledger.get_history(), vec!["1 + 1 = 2"]);
    }

    #[test]
    fn test_undo_last() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("X");
        ledger.add_to_history("Y");
        assert_eq!(ledger.undo_last(), Some(HistoryEntry::from("Y")));
        assert_eq!(ledger.get_history(), vec!["X"]);
    }

    #[test]
    fn test_undo_last_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        assert_eq!(ledger.undo_last(), None);
    }

    #[test]
    fn test_save_writes_header_and_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("3 multiply 3 = 9");
        ledger.save_history().unwrap();

        let text = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(text, "entry\n3 multiply 3 = 9\n");
    }

    #[test]
    fn test_save_empty_ledger_keeps_header() {
        let tmp = tempfile::tempdir().unwrap();
        let ledger = ledger_in(tmp.path());
        ledger.save_history().unwrap();
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), "entry\n");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = HistoryLedger::new(HistoryConfig::new(tmp.path().join("nested/dir/h.csv")));
        ledger.add_to_history("1 add 1 = 2");
        ledger.save_history().unwrap();
        assert!(ledger.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        let rows = ["3 add 3 = 6", "sqrt(4) = 2", "quoted \"x\", with comma = 1"];
        for row in rows {
            ledger.add_to_history(row);
        }
        ledger.save_history().unwrap();

        let mut fresh = ledger_in(tmp.path());
        fresh.load_history().unwrap();
        assert_eq!(fresh.get_history(), rows.to_vec());
    }

    #[test]
    fn test_save_truncates_longer_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        for row in ["1 add 1 = 2", "2 add 2 = 4", "3 add 3 = 6"] {
            ledger.add_to_history(row);
        }
        ledger.save_history().unwrap();
        ledger.undo_last().unwrap();
        ledger.undo_last().unwrap();
        ledger.save_history().unwrap();

        let text = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(text, "entry\n1 add 1 = 2\n");

        let mut fresh = ledger_in(tmp.path());
        fresh.load_history().unwrap();
        assert_eq!(fresh.get_history(), vec!["1 add 1 = 2"]);
    }

    #[test]
    fn test_load_replaces_rather_than_merges() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("saved");
        ledger.save_history().unwrap();
        ledger.add_to_history("unsaved");

        ledger.load_history().unwrap();
        assert_eq!(ledger.get_history(), vec!["saved"]);
    }

    #[test]
    fn test_load_missing_file_resets() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("stale");
        ledger.load_history().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_rejects_wrong_header() {
        let tmp = tempfile::tempdir().unwrap();
        let ledger_path = tmp.path().join("test_history.csv");
        fs::write(&ledger_path, "calc\n1 add 1 = 2\n").unwrap();

        let mut ledger = ledger_in(tmp.path());
        let err = ledger.load_history().unwrap_err();
        assert!(matches!(err, HistoryError::MissingColumn { .. }));
    }

    #[test]
    fn test_clear_history_removes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.add_to_history("4 divide 2 = 2");
        ledger.save_history().unwrap();

        ledger.clear_history().unwrap();
        assert!(ledger.get_history().is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn test_clear_history_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(tmp.path());
        ledger.clear_history().unwrap();
        ledger.clear_history().unwrap();
        assert!(ledger.is_empty());
    }
}
