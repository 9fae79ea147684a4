use super::kv::KeyValueStore;
use crate::models::SearchHistoryEntry;
use anyhow::{Context, Result};
use tracing::{debug, warn};

pub const HISTORY_KEY: &str = "searchHistory";

/// Longest history kept
pub const MAX_HISTORY: usize = 5;

/// Most-recent-first log of past searches, persisted as a JSON array
pub struct SearchHistory<S> {
    store: S,
}

impl<S: KeyValueStore> SearchHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored entries, or empty when absent or unreadable
    pub fn load_all(&self) -> Vec<SearchHistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read search history: {:#}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SearchHistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(MAX_HISTORY);
                entries
            }
            Err(e) => {
                warn!("Ignoring malformed search history: {}", e);
                Vec::new()
            }
        }
    }

    pub fn most_recent(&self) -> Option<SearchHistoryEntry> {
        self.load_all().into_iter().next()
    }

    /// Prepend `entry`, keep the newest [`MAX_HISTORY`], persist, and
    /// return the updated list
    pub fn record(&self, entry: SearchHistoryEntry) -> Result<Vec<SearchHistoryEntry>> {
        let mut entries = self.load_all();
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY);

        let json = serde_json::to_string(&entries).context("Failed to serialize search history")?;
        self.store
            .set(HISTORY_KEY, &json)
            .context("Failed to persist search history")?;

        debug!("Search history now holds {} entries", entries.len());
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn entry(location: &str, millis: i64) -> SearchHistoryEntry {
        SearchHistoryEntry::new(location, None, Utc.timestamp_millis_opt(millis).unwrap())
    }

    #[test]
    fn test_empty_history() {
        let history = SearchHistory::new(MemoryStore::new());
        assert!(history.load_all().is_empty());
        assert!(history.most_recent().is_none());
    }

    #[test]
    fn test_record_prepends_and_caps_at_five() {
        let history = SearchHistory::new(MemoryStore::new());
        for i in 0..8 {
            let entries = history.record(entry(&format!("City {}", i), i)).unwrap();
            assert!(entries.len() <= MAX_HISTORY);
            assert_eq!(entries[0].location, format!("City {}", i));
        }

        let locations: Vec<String> = history.load_all().into_iter().map(|e| e.location).collect();
        assert_eq!(locations, vec!["City 7", "City 6", "City 5", "City 4", "City 3"]);
        assert_eq!(history.most_recent().unwrap().location, "City 7");
    }

    #[test]
    fn test_malformed_history_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let history = SearchHistory::new(store);

        assert!(history.load_all().is_empty());

        // Recording over garbage starts a fresh list
        let entries = history.record(entry("Austin", 1)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_reads_history_written_by_the_browser_client() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":"1700000000000","location":"Austin, Texas, United States","coords":{"lng":-97.7431,"lat":30.2672},"timestamp":1700000000000},
                   {"id":"1690000000000","location":"atlantis","timestamp":1690000000000}]"#,
            )
            .unwrap();
        let history = SearchHistory::new(store);

        let entries = history.load_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].coords, Some(Coordinate::new(-97.7431, 30.2672)));
        assert_eq!(entries[1].coords, None);
    }

    #[test]
    fn test_clear() {
        let history = SearchHistory::new(MemoryStore::new());
        history.record(entry("Austin", 1)).unwrap();
        history.clear().unwrap();
        assert!(history.load_all().is_empty());
    }
}
