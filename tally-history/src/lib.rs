//! Tally History
//!
//! An append-only, undoable ledger of calculation records, persisted as a
//! single-column CSV file (`entry` header, one record per row).

mod entry;
mod error;
mod ledger;

pub use entry::HistoryEntry;
pub use error::HistoryError;
pub use ledger::{HistoryConfig, HistoryLedger, DEFAULT_HISTORY_FILE, ENTRY_COLUMN};
