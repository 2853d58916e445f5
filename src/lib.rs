//! # Strata
//!
//! Request modeling core for an analytical reporting service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        External configuration (JSON templates)           │
//! │        (dimensions, field sets, makers, metrics)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [config loaders]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Dictionaries (dimensions, metrics, metric makers)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [request construction - upstream]
//! ┌─────────────────────────────────────────────────────────┐
//! │        DataRequest (immutable value object)              │
//! │        + functional updates between stages               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [execution engine - external]
//! ```
//!
//! The crate owns two things with real invariants: the immutable
//! [`request::DataRequest`] with its wither protocol and sort-composition
//! rules, and the [`makers`] registry that turns declarative templates into
//! named metric makers. Everything under [`config`] is the thin loading
//! layer that feeds them.

pub mod config;
pub mod makers;
pub mod model;
pub mod request;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::makers::{MakerDictionary, MakerTemplate, MetricMaker};
    pub use crate::model::{
        combine_sorts, extract_standard_sorts, extract_time_sort, ApiFilter, Dimension,
        DimensionDictionary, DimensionField, FilterOperation, Granularity, Having,
        HavingOperation, Interval, LogicalMetric, LogicalTable, MetricDictionary,
        MetricExpression, SortDirection, SortDirective, SortTarget, TimeGrain,
    };
    pub use crate::request::{AsyncAfter, DataRequest, PaginationParameters, ResponseFormat};
}

pub use model::{Granularity, Interval, LogicalTable, SortDirective, TimeGrain};
pub use request::DataRequest;
