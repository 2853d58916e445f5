//! Dimension configuration templates and loading.
//!
//! The dimension config file declares each dimension once and lets several
//! dimensions share a field list through named field sets:
//!
//! ```json
//! {
//!   "dimensions": [
//!     {"apiName": "country", "description": "Country of the edit", "fields": "minimal"},
//!     {"apiName": "page", "description": "Edited page", "fields": [{"name": "id"}, {"name": "title"}]}
//!   ],
//!   "fieldSets": {
//!     "default": [{"name": "id", "description": "unique id"}, {"name": "desc"}],
//!     "minimal": [{"name": "id"}]
//!   }
//! }
//! ```
//!
//! A `fields` entry is either the name of a field set or an inline list; a
//! dimension with no entry gets the `default` set when one exists.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::stores::{SearchProviderRegistry, StoreRegistry};
use crate::model::{Dimension, DimensionDictionary, DimensionField};

/// Name of the field set applied when a dimension declares none.
const DEFAULT_FIELD_SET: &str = "default";

/// One field of a dimension, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A dimension's `fields` entry: a field-set reference or an inline list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Named(String),
    Inline(Vec<FieldTemplate>),
}

/// One dimension record from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionTemplate {
    pub api_name: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Option<FieldSpec>,
}

impl DimensionTemplate {
    /// Resolve this dimension's fields against the shared field sets.
    ///
    /// Unknown set names and absent specs fall back to the `default` set,
    /// then to no fields at all.
    pub fn resolve_fields(
        &self,
        field_sets: &IndexMap<String, Vec<FieldTemplate>>,
    ) -> Vec<DimensionField> {
        let templates = match &self.fields {
            Some(FieldSpec::Inline(fields)) => fields.as_slice(),
            Some(FieldSpec::Named(set_name)) => field_sets
                .get(set_name)
                .or_else(|| field_sets.get(DEFAULT_FIELD_SET))
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => field_sets
                .get(DEFAULT_FIELD_SET)
                .map(Vec::as_slice)
                .unwrap_or_default(),
        };
        templates
            .iter()
            .map(|field| DimensionField::new(&field.name, &field.description))
            .collect()
    }
}

/// The whole dimension configuration artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfigTemplate {
    pub dimensions: Vec<DimensionTemplate>,
    #[serde(default)]
    pub field_sets: IndexMap<String, Vec<FieldTemplate>>,
}

/// Builds [`Dimension`]s from configuration and registers them.
///
/// Stores and search providers come from the passed-in registries, one per
/// dimension, keyed by the dimension's api name.
#[derive(Debug)]
pub struct DimensionsLoader {
    stores: Arc<StoreRegistry>,
    search_providers: Arc<SearchProviderRegistry>,
}

impl DimensionsLoader {
    pub fn new(stores: Arc<StoreRegistry>, search_providers: Arc<SearchProviderRegistry>) -> Self {
        Self {
            stores,
            search_providers,
        }
    }

    /// Build every configured dimension and add it to the dictionary.
    ///
    /// Returns the built dimensions in configuration order.
    pub fn load(
        &self,
        config: &DimensionConfigTemplate,
        dictionary: &DimensionDictionary,
    ) -> Vec<Arc<Dimension>> {
        let mut loaded = Vec::with_capacity(config.dimensions.len());
        for template in &config.dimensions {
            // Materialize the backing store and provider for this dimension.
            self.stores.get_or_create(&template.api_name);
            self.search_providers.get_or_create(&template.api_name);

            let dimension = Arc::new(Dimension {
                api_name: template.api_name.clone(),
                long_name: template
                    .long_name
                    .clone()
                    .unwrap_or_else(|| template.api_name.clone()),
                category: template.category.clone().unwrap_or_default(),
                description: template.description.clone(),
                fields: template.resolve_fields(&config.field_sets),
                key_value_store: template.api_name.clone(),
                search_provider: template.api_name.clone(),
            });
            debug!(dimension = %dimension.api_name, "loaded dimension configuration");
            dictionary.add(Arc::clone(&dimension));
            loaded.push(dimension);
        }
        loaded
    }
}
