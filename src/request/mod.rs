//! The immutable, fully-resolved query request.
//!
//! A [`DataRequest`] is produced once per incoming request, after upstream
//! parsing and validation, and threaded through the stages of request
//! interpretation by functional updates: every `with_*` operation returns a
//! new request differing in exactly one facet, and the receiver is never
//! mutated. No operation here validates cross-field consistency or raises
//! errors; callers own those rules.

mod format;
mod pagination;

pub use format::ResponseFormat;
pub use pagination::PaginationParameters;

use std::time::Duration;

use chrono_tz::Tz;
use indexmap::{IndexMap, IndexSet};

use crate::model::granularity::Granularity;
use crate::model::having::Having;
use crate::model::interval::Interval;
use crate::model::sort::{combine_sorts, extract_standard_sorts, extract_time_sort};
use crate::model::table::LogicalTable;
use crate::model::{ApiFilter, SortDirective};

/// Threshold after which the caller receives an asynchronous ticket instead
/// of a synchronous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncAfter {
    /// Always respond synchronously.
    Never,
    /// Always respond with a ticket.
    Always,
    /// Respond with a ticket once the query has run this long.
    After(Duration),
}

impl AsyncAfter {
    /// Map a millisecond threshold to the enum; zero means "always async".
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            AsyncAfter::Always
        } else {
            AsyncAfter::After(Duration::from_millis(millis))
        }
    }
}

/// An immutable aggregate of every resolved facet of an analytical query.
///
/// All fields are set at construction; collection arguments are moved in, so
/// no caller can mutate them afterwards, and accessors hand out shared
/// references or copies only. `all_sorts` is the sole source of truth for
/// ordering; [`DataRequest::sorts`] and [`DataRequest::date_time_sort`] are
/// derived views.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    table: LogicalTable,
    granularity: Granularity,
    dimensions: IndexSet<String>,
    dimension_fields: IndexMap<String, IndexSet<String>>,
    metrics: IndexSet<String>,
    intervals: Vec<Interval>,
    filters: IndexSet<ApiFilter>,
    havings: IndexMap<String, Vec<Having>>,
    all_sorts: IndexSet<SortDirective>,
    count: Option<u64>,
    top_n: Option<u64>,
    format: ResponseFormat,
    download_filename: Option<String>,
    time_zone: Tz,
    async_after: AsyncAfter,
    pagination: Option<PaginationParameters>,
}

impl DataRequest {
    /// Full-argument constructor; every facet must be fully built beforehand.
    ///
    /// `all_sorts` is stored verbatim and must carry at most one
    /// time-targeted directive; upstream request parsing owns that rule.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        table: LogicalTable,
        granularity: Granularity,
        dimensions: IndexSet<String>,
        dimension_fields: IndexMap<String, IndexSet<String>>,
        metrics: IndexSet<String>,
        intervals: Vec<Interval>,
        filters: IndexSet<ApiFilter>,
        havings: IndexMap<String, Vec<Having>>,
        all_sorts: IndexSet<SortDirective>,
        count: Option<u64>,
        top_n: Option<u64>,
        format: ResponseFormat,
        download_filename: Option<String>,
        time_zone: Tz,
        async_after: AsyncAfter,
        pagination: Option<PaginationParameters>,
    ) -> Self {
        Self {
            table,
            granularity,
            dimensions,
            dimension_fields,
            metrics,
            intervals,
            filters,
            havings,
            all_sorts,
            count,
            top_n,
            format,
            download_filename,
            time_zone,
            async_after,
            pagination,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn table(&self) -> &LogicalTable {
        &self.table
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Grouping dimensions, in grouping order.
    pub fn dimensions(&self) -> &IndexSet<String> {
        &self.dimensions
    }

    /// Fields to project per dimension. A grouped dimension absent from this
    /// map gets its defaults applied downstream.
    pub fn dimension_fields(&self) -> &IndexMap<String, IndexSet<String>> {
        &self.dimension_fields
    }

    pub fn metrics(&self) -> &IndexSet<String> {
        &self.metrics
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn filters(&self) -> &IndexSet<ApiFilter> {
        &self.filters
    }

    pub fn havings(&self) -> &IndexMap<String, Vec<Having>> {
        &self.havings
    }

    /// Every sort directive, the time sort included if present.
    pub fn all_sorts(&self) -> &IndexSet<SortDirective> {
        &self.all_sorts
    }

    /// The non-time sorts, derived from `all_sorts`.
    pub fn sorts(&self) -> IndexSet<SortDirective> {
        extract_standard_sorts(&self.all_sorts)
    }

    /// The time sort, if present, derived from `all_sorts`.
    pub fn date_time_sort(&self) -> Option<&SortDirective> {
        extract_time_sort(&self.all_sorts)
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn top_n(&self) -> Option<u64> {
        self.top_n
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Present when the response must be delivered as a downloadable file.
    pub fn download_filename(&self) -> Option<&str> {
        self.download_filename.as_deref()
    }

    /// Zone in which the granularity buckets and intervals are interpreted.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn async_after(&self) -> AsyncAfter {
        self.async_after
    }

    pub fn pagination(&self) -> Option<&PaginationParameters> {
        self.pagination.as_ref()
    }

    // ------------------------------------------------------------------
    // Withers
    // ------------------------------------------------------------------

    pub fn with_table(&self, table: LogicalTable) -> Self {
        Self {
            table,
            ..self.clone()
        }
    }

    pub fn with_granularity(&self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self.clone()
        }
    }

    pub fn with_dimensions(&self, dimensions: IndexSet<String>) -> Self {
        Self {
            dimensions,
            ..self.clone()
        }
    }

    pub fn with_dimension_fields(
        &self,
        dimension_fields: IndexMap<String, IndexSet<String>>,
    ) -> Self {
        Self {
            dimension_fields,
            ..self.clone()
        }
    }

    pub fn with_metrics(&self, metrics: IndexSet<String>) -> Self {
        Self {
            metrics,
            ..self.clone()
        }
    }

    pub fn with_intervals(&self, intervals: Vec<Interval>) -> Self {
        Self {
            intervals,
            ..self.clone()
        }
    }

    pub fn with_filters(&self, filters: IndexSet<ApiFilter>) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }

    pub fn with_havings(&self, havings: IndexMap<String, Vec<Having>>) -> Self {
        Self {
            havings,
            ..self.clone()
        }
    }

    /// Replace the non-time sorts, keeping the current time sort in front.
    ///
    /// Time-targeted directives in `sorts` are discarded by the
    /// recombination, so this can never introduce a second time sort.
    pub fn with_sorts(&self, sorts: IndexSet<SortDirective>) -> Self {
        Self {
            all_sorts: combine_sorts(self.date_time_sort().cloned(), sorts),
            ..self.clone()
        }
    }

    /// Replace (or clear) the time sort, keeping the current standard sorts.
    pub fn with_time_sort(&self, time_sort: Option<SortDirective>) -> Self {
        Self {
            all_sorts: combine_sorts(time_sort, self.sorts()),
            ..self.clone()
        }
    }

    /// Replace the whole sort set verbatim. The caller is responsible for
    /// supplying at most one time-targeted directive.
    pub fn with_all_sorts(&self, all_sorts: IndexSet<SortDirective>) -> Self {
        Self {
            all_sorts,
            ..self.clone()
        }
    }

    pub fn with_count(&self, count: Option<u64>) -> Self {
        Self {
            count,
            ..self.clone()
        }
    }

    pub fn with_top_n(&self, top_n: Option<u64>) -> Self {
        Self {
            top_n,
            ..self.clone()
        }
    }

    pub fn with_format(&self, format: ResponseFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    pub fn with_download_filename(&self, download_filename: Option<String>) -> Self {
        Self {
            download_filename,
            ..self.clone()
        }
    }

    pub fn with_time_zone(&self, time_zone: Tz) -> Self {
        Self {
            time_zone,
            ..self.clone()
        }
    }

    pub fn with_async_after(&self, async_after: AsyncAfter) -> Self {
        Self {
            async_after,
            ..self.clone()
        }
    }

    pub fn with_pagination(&self, pagination: Option<PaginationParameters>) -> Self {
        Self {
            pagination,
            ..self.clone()
        }
    }
}
