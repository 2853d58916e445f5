//! Metric configuration templates and loading.
//!
//! The metric config file has two halves: maker templates, which build the
//! maker dictionary, and metric templates, each naming the maker that builds
//! it plus the dependent names handed to that maker:
//!
//! ```json
//! {
//!   "makers": [
//!     {"name": "longSum", "type": "longSum"},
//!     {"name": "dailyAvg", "type": "aggregationAverage", "params": {"innerGrain": "day"}}
//!   ],
//!   "metrics": [
//!     {"name": "added", "maker": "longSum", "dependents": ["added"]},
//!     {"name": "dailyAvgAdded", "maker": "dailyAvg", "dependents": ["added"]}
//!   ]
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::makers::{MakerDictionary, MakerDictionaryError, MakerTemplate};
use crate::model::{DimensionDictionary, MetricDictionary};

/// Error type for metric configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error(transparent)]
    MakerDictionary(#[from] MakerDictionaryError),
}

/// One logical metric record from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTemplate {
    pub name: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Name of the maker that builds this metric.
    pub maker: String,
    /// Names handed to the maker: physical fields, other logical metrics, or
    /// dimension api names, depending on the maker.
    #[serde(default)]
    pub dependents: Vec<String>,
}

/// The whole metric configuration artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfigTemplate {
    #[serde(default)]
    pub makers: Vec<MakerTemplate>,
    #[serde(default)]
    pub metrics: Vec<MetricTemplate>,
}

/// Drives the makers to populate the metric dictionary.
#[derive(Debug, Default)]
pub struct MetricsLoader;

impl MetricsLoader {
    pub fn new() -> Self {
        Self
    }

    /// Build the maker dictionary from the config's maker templates, then
    /// make and register every configured metric.
    ///
    /// Metrics whose maker is unknown or whose construction fails are logged
    /// and skipped. A duplicate maker name is fatal and propagates.
    pub fn load(
        &self,
        config: &MetricConfigTemplate,
        metrics: &Arc<MetricDictionary>,
        dimensions: &Arc<DimensionDictionary>,
    ) -> Result<MakerDictionary, LoaderError> {
        let makers =
            MakerDictionary::from_templates(config.makers.iter().cloned(), metrics, dimensions)?;

        for template in &config.metrics {
            let maker = match makers.find_by_name(&template.maker) {
                Some(maker) => maker,
                None => {
                    warn!(
                        metric = %template.name,
                        maker = %template.maker,
                        "skipping metric: no such maker"
                    );
                    continue;
                }
            };
            match maker.make(&template.name, &template.dependents) {
                Ok(mut metric) => {
                    if let Some(long_name) = &template.long_name {
                        metric.long_name = long_name.clone();
                    }
                    if let Some(category) = &template.category {
                        metric.category = category.clone();
                    }
                    metric.description = template.description.clone();
                    debug!(metric = %metric.name, "registered logical metric");
                    metrics.add(Arc::new(metric));
                }
                Err(error) => {
                    warn!(metric = %template.name, %error, "skipping metric");
                }
            }
        }

        Ok(makers)
    }
}
