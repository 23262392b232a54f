// Durable persistence for the filter store: one JSON blob on disk holding
// { filters, sort, searchQuery }. Read once at startup, written on every
// mutation. Missing or corrupt data falls back to defaults; write failures
// degrade to an in-memory-only session. Nothing here ever returns an error
// to the caller.

use crate::models::{Filters, SortOption};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// The persisted subset of store state. Result count and the hydration
// flag are deliberately not part of this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFilters {
    pub filters: Filters,
    pub sort: SortOption,
    #[serde(default)]
    pub search_query: String,
}

pub struct FilterStorage {
    path: PathBuf,
}

impl FilterStorage {
    pub fn new(path: PathBuf) -> Self {
        FilterStorage { path }
    }

    // Load the persisted snapshot, or None when the blob is missing or
    // unreadable. Corruption is logged and treated the same as absence.
    pub fn load(&self) -> Option<PersistedFilters> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = ?self.path, error = %e, "No persisted filter state to load");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Persisted filter state is corrupt, falling back to defaults");
                None
            }
        }
    }

    // Best-effort write; failures are logged and swallowed so a read-only
    // disk cannot break filtering for the session.
    pub fn save(&self, state: &PersistedFilters) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = ?self.path, error = %e, "Could not create filter storage directory");
                return;
            }
        }
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize filter state");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!(path = ?self.path, error = %e, "Could not persist filter state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleType;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let storage = FilterStorage::new(dir.path().join("filters.json"));

        let mut state = PersistedFilters::default();
        state.filters.vehicle_type = VehicleType::TwoWheeler;
        state.filters.fuel_type.push("Petrol".to_string());
        state.sort = SortOption::KmsDesc;
        state.search_query = "swift".to_string();

        storage.save(&state);
        assert_eq!(storage.load(), Some(state));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let storage = FilterStorage::new(dir.path().join("nope.json"));
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn corrupt_blob_loads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(FilterStorage::new(path).load(), None);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("filters.json");
        let storage = FilterStorage::new(path);
        storage.save(&PersistedFilters::default());
        assert!(storage.load().is_some());
    }
}
