// src/model/dimension.rs
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

/// A projectable field of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionField {
    pub name: String,
    pub description: String,
}

impl DimensionField {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A categorical grouping attribute with one or more fields.
///
/// The key/value store and search provider backing the dimension are
/// referenced by registry name; the registries own the instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub api_name: String,
    pub long_name: String,
    pub category: String,
    pub description: String,
    /// Fields in projection order.
    pub fields: Vec<DimensionField>,
    pub key_value_store: String,
    pub search_provider: String,
}

/// Shared name-to-dimension dictionary.
///
/// Populated once by the dimensions loader, then read concurrently. The
/// internal lock exists because makers hold an `Arc` to the dictionary while
/// the loader is still filling it.
#[derive(Debug, Default)]
pub struct DimensionDictionary {
    dimensions: RwLock<IndexMap<String, Arc<Dimension>>>,
}

impl DimensionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dimension under its lower-cased api name, returning the
    /// previously registered entry if one existed.
    pub fn add(&self, dimension: Arc<Dimension>) -> Option<Arc<Dimension>> {
        let key = dimension.api_name.to_lowercase();
        self.dimensions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, dimension)
    }

    /// Case-insensitive lookup by api name.
    pub fn find_by_api_name(&self, api_name: &str) -> Option<Arc<Dimension>> {
        self.dimensions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&api_name.to_lowercase())
            .cloned()
    }

    /// Registered api names, in registration order.
    pub fn api_names(&self) -> Vec<String> {
        self.dimensions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|d| d.api_name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.dimensions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
