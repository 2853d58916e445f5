//! Per-dimension key/value stores and search providers.
//!
//! The registries here replace process-wide singleton managers: the
//! composition root creates them at startup and passes them to the
//! dimensions loader, which resolves one store and one provider per
//! dimension by name, creating them lazily on first use.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// An in-memory key/value store backing one dimension's rows.
#[derive(Debug, Default)]
pub struct MapStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store a value, returning the previous one if present.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns one [`MapStore`] per name, created lazily.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<String, Arc<MapStore>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store registered under `name`, creating it on first use.
    pub fn get_or_create(&self, name: &str) -> Arc<MapStore> {
        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            stores
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(MapStore::new())),
        )
    }

    pub fn get(&self, name: &str) -> Option<Arc<MapStore>> {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

/// A search provider that scans every row of one dimension.
///
/// Rows are field-name to value maps. Scanning is linear; this is the
/// fallback provider for dimensions small enough not to need an index.
#[derive(Debug, Default)]
pub struct ScanSearchProvider {
    rows: RwLock<Vec<HashMap<String, String>>>,
}

impl ScanSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&self, row: HashMap<String, String>) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(row);
    }

    pub fn find_all_rows(&self) -> Vec<HashMap<String, String>> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rows whose `field` equals `value`.
    pub fn find_rows_with_field_value(
        &self,
        field: &str,
        value: &str,
    ) -> Vec<HashMap<String, String>> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|row| row.get(field).is_some_and(|v| v == value))
            .cloned()
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Owns one [`ScanSearchProvider`] per name, created lazily.
#[derive(Debug, Default)]
pub struct SearchProviderRegistry {
    providers: RwLock<HashMap<String, Arc<ScanSearchProvider>>>,
}

impl SearchProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The provider registered under `name`, creating it on first use.
    pub fn get_or_create(&self, name: &str) -> Arc<ScanSearchProvider> {
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            providers
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(ScanSearchProvider::new())),
        )
    }

    pub fn get(&self, name: &str) -> Option<Arc<ScanSearchProvider>> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
