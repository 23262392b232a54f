// Single source of truth for user-controlled listing parameters: filters,
// sort order and search query, plus the derived result count. The store is
// a plain constructor-injected struct so tests can spin up isolated
// instances; the running server keeps one behind an RwLock in AppState.
//
// Persistence is explicit rather than a wrapper: construction performs the
// load-initial-state step (hydration), and every mutation writes the
// snapshot back. URL-sourced seeding goes through `apply_url_seed`, which
// never writes, so the URL read path cannot bounce a write back at the URL.

use crate::models::{Filters, MultiFilterField, SortOption, VehicleType};
use crate::storage::{FilterStorage, PersistedFilters};
use crate::url_sync::UrlSeed;

pub struct FilterStore {
    filters: Filters,
    sort: SortOption,
    search_query: String,
    result_count: usize,
    hydrated: bool,
    storage: Option<FilterStorage>,
}

impl FilterStore {
    // Build a store hydrated from the given storage. Storage failures
    // degrade silently to defaults; the store is always usable afterwards.
    pub fn new(storage: Option<FilterStorage>) -> Self {
        let persisted = storage
            .as_ref()
            .and_then(|s| s.load())
            .unwrap_or_default();

        FilterStore {
            filters: persisted.filters,
            sort: persisted.sort,
            search_query: persisted.search_query,
            result_count: 0,
            hydrated: true,
            storage,
        }
    }

    // In-memory store with default state, mainly for tests.
    pub fn in_memory() -> Self {
        FilterStore::new(None)
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    // The URL synchronizer must not write to the URL, nor treat defaults
    // as user intent, before hydration has completed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    // Symmetric toggle: present -> remove, absent -> append.
    pub fn toggle_multi_filter(&mut self, field: MultiFilterField, value: &str) {
        let values = self.filters.field_mut(field);
        match values.iter().position(|v| v == value) {
            Some(index) => {
                values.remove(index);
            }
            None => values.push(value.to_string()),
        }
        self.persist();
    }

    // Switching vehicle type empties every multi-valued dimension and the
    // search query, so nothing from the previous type can leak through.
    pub fn set_vehicle_type(&mut self, vehicle_type: VehicleType) {
        self.filters.vehicle_type = vehicle_type;
        self.filters.reset_multi_fields();
        self.search_query.clear();
        self.persist();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.persist();
    }

    // Stored verbatim; normalization happens in the engine.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.persist();
    }

    // Clears everything except the selected vehicle type.
    pub fn clear_filters(&mut self) {
        self.filters.reset_multi_fields();
        self.search_query.clear();
        self.persist();
    }

    // Write-only cache of the engine's output length; not persisted and
    // never an input to any computation here.
    pub fn set_result_count(&mut self, count: usize) {
        self.result_count = count;
    }

    // Merge URL-sourced partial state. This is the one mutation path that
    // does not persist: the URL only seeds a view, it is not user intent
    // to overwrite the saved session state.
    pub fn apply_url_seed(&mut self, seed: &UrlSeed) {
        if let Some(vehicle_type) = seed.vehicle_type {
            if vehicle_type != self.filters.vehicle_type {
                self.filters.vehicle_type = vehicle_type;
                self.filters.reset_multi_fields();
                self.search_query.clear();
            }
        }
        if let Some(sort) = seed.sort {
            self.sort = sort;
        }
        for (field, values) in &seed.multi {
            *self.filters.field_mut(*field) = values.clone();
        }
    }

    pub fn snapshot(&self) -> PersistedFilters {
        PersistedFilters {
            filters: self.filters.clone(),
            sort: self.sort,
            search_query: self.search_query.clone(),
        }
    }

    fn persist(&self) {
        if let Some(ref storage) = self.storage {
            storage.save(&self.snapshot());
        }
    }
}
