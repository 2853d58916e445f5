//! Sort directives and the split/merge helpers for the time sort.
//!
//! A request stores one ordered set of sort directives (`all_sorts`), of
//! which at most one may target the time column. The functions here split
//! that set into its time and standard halves and recombine them after a
//! partial update. [`combine_sorts`] is the only sanctioned way to rebuild
//! the full set: it keeps the time sort in front and refuses to let a second
//! time-targeted directive slip in through the standard half.

use indexmap::IndexSet;

/// Result ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_name(name: &str) -> Option<SortDirection> {
        match name.to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// What a sort directive orders by.
///
/// The time-targeted directive is distinguished structurally; every other
/// directive names a logical metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortTarget {
    Time,
    Metric(String),
}

/// A (target, direction) pair specifying result ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub target: SortTarget,
    pub direction: SortDirection,
}

impl SortDirective {
    /// A directive ordering by the time column.
    pub fn time(direction: SortDirection) -> Self {
        Self {
            target: SortTarget::Time,
            direction,
        }
    }

    /// A directive ordering by a logical metric.
    pub fn metric(name: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            target: SortTarget::Metric(name.into()),
            direction,
        }
    }

    pub fn is_time_sort(&self) -> bool {
        self.target == SortTarget::Time
    }
}

/// The time-targeted directive, if any.
///
/// A well-formed set carries at most one; if a malformed input carries more,
/// the first in iteration order wins.
pub fn extract_time_sort(all_sorts: &IndexSet<SortDirective>) -> Option<&SortDirective> {
    all_sorts.iter().find(|sort| sort.is_time_sort())
}

/// Every directive except the time sort, relative order preserved.
pub fn extract_standard_sorts(all_sorts: &IndexSet<SortDirective>) -> IndexSet<SortDirective> {
    all_sorts
        .iter()
        .filter(|sort| !sort.is_time_sort())
        .cloned()
        .collect()
}

/// Rebuild a full sort set from its two halves.
///
/// The time sort, if present, comes first; standard sorts follow in their
/// given order. Time-targeted directives in `standard_sorts` are discarded,
/// so the result never holds more than one time sort.
pub fn combine_sorts(
    time_sort: Option<SortDirective>,
    standard_sorts: IndexSet<SortDirective>,
) -> IndexSet<SortDirective> {
    let mut combined = IndexSet::with_capacity(standard_sorts.len() + 1);
    if let Some(time_sort) = time_sort {
        combined.insert(time_sort);
    }
    for sort in standard_sorts {
        if !sort.is_time_sort() {
            combined.insert(sort);
        }
    }
    combined
}
