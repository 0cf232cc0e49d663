//! One recorded calculation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Formatted record of a completed calculation, e.g. `"1 add 1 = 2"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntry(String);

impl HistoryEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HistoryEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for HistoryEntry {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HistoryEntry {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for HistoryEntry {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HistoryEntry {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
