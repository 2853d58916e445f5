//! Configuration module for Strata.
//!
//! Handles external JSON template loading, dimension and metric
//! configuration, and the registries backing configured dimensions.

mod dimension;
mod loader;
mod metric;
mod stores;

pub use dimension::{
    DimensionConfigTemplate, DimensionTemplate, DimensionsLoader, FieldSpec, FieldTemplate,
};
pub use loader::{ConfigError, ExternalConfigLoader};
pub use metric::{LoaderError, MetricConfigTemplate, MetricTemplate, MetricsLoader};
pub use stores::{MapStore, ScanSearchProvider, SearchProviderRegistry, StoreRegistry};
