//! Bounded, persisted list of recent analysis results

use crate::error::ReplayError;
use crate::types::HistoryEntry;
use std::sync::Arc;
use watchworthy_store::KeyValueStore;

/// Most recent results kept; older entries are discarded on insert
pub const HISTORY_CAPACITY: usize = 5;

/// Storage key holding the serialized history
pub const HISTORY_KEY: &str = "history";

/// Decode a stored history array, keeping at most [`HISTORY_CAPACITY`] entries
pub fn decode_history(raw: &str) -> Result<Vec<HistoryEntry>, serde_json::Error> {
    let mut entries: Vec<HistoryEntry> = serde_json::from_str(raw)?;
    entries.truncate(HISTORY_CAPACITY);
    Ok(entries)
}

/// Read history from storage.
///
/// Absent, unreadable or malformed history yields an empty list: a corrupt
/// store must never keep the application from starting.
pub fn load_history(store: &dyn KeyValueStore) -> Vec<HistoryEntry> {
    let raw = match store.read(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "history storage unreadable, starting empty");
            return Vec::new();
        }
    };

    match decode_history(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed history");
            Vec::new()
        }
    }
}

/// Overwrite stored history with `entries`. Failures are logged and dropped.
pub fn persist_history(store: &dyn KeyValueStore, entries: &[HistoryEntry]) {
    let json = match serde_json::to_string(entries) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "could not serialize history");
            return;
        }
    };

    if let Err(e) = store.write(HISTORY_KEY, &json) {
        tracing::warn!(error = %e, "could not persist history");
    }
}

/// Recent results, most recent first, written through to storage on insert
pub struct RecencyCache {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
}

impl RecencyCache {
    /// Initialize from whatever the store holds
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = load_history(store.as_ref());
        tracing::debug!(entries = entries.len(), "history loaded");
        Self { entries, store }
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

    /// Prepend `entry`, drop anything past capacity, then persist.
    ///
    /// Repeated queries are not deduplicated.
    pub fn insert(&mut self, entry: HistoryEntry) -> &[HistoryEntry] {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
        &self.entries
    }

    /// Entry at `index` (0 = most recent). Order is left untouched.
    pub fn replay(&self, index: usize) -> Result<&HistoryEntry, ReplayError> {
        self.entries.get(index).ok_or(ReplayError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Best-effort write of the current entries
    pub fn persist(&self) {
        persist_history(self.store.as_ref(), &self.entries);
    }
}
