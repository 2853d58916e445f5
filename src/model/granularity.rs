//! Time grains and query granularity.
//!
//! A [`TimeGrain`] is the unit results are bucketed by; [`Granularity`] adds
//! the "all" case where the whole queried span collapses into one bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of time-bucketing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGrain {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeGrain {
    /// Resolve a grain from its configuration name, case-insensitively.
    pub fn from_name(name: &str) -> Option<TimeGrain> {
        match name.to_lowercase().as_str() {
            "minute" => Some(TimeGrain::Minute),
            "hour" => Some(TimeGrain::Hour),
            "day" => Some(TimeGrain::Day),
            "week" => Some(TimeGrain::Week),
            "month" => Some(TimeGrain::Month),
            "quarter" => Some(TimeGrain::Quarter),
            "year" => Some(TimeGrain::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeGrain::Minute => "minute",
            TimeGrain::Hour => "hour",
            TimeGrain::Day => "day",
            TimeGrain::Week => "week",
            TimeGrain::Month => "month",
            TimeGrain::Quarter => "quarter",
            TimeGrain::Year => "year",
        }
    }
}

impl fmt::Display for TimeGrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The time-bucketing granularity of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// No time bucketing: the entire queried span is one bucket.
    All,
    /// Bucket by a time grain.
    Grain(TimeGrain),
}

impl Granularity {
    /// Resolve a granularity from its configuration name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Granularity> {
        if name.eq_ignore_ascii_case("all") {
            return Some(Granularity::All);
        }
        TimeGrain::from_name(name).map(Granularity::Grain)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::All => "all",
            Granularity::Grain(grain) => grain.as_str(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
