//! Wither purity: every `with_*` operation produces a new request differing
//! in exactly the targeted facet, and never touches its receiver.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use indexmap::{IndexMap, IndexSet};
use strata::model::{
    ApiFilter, FilterOperation, Granularity, Having, HavingOperation, Interval, LogicalTable,
    SortDirection, SortDirective, TimeGrain,
};
use strata::request::{AsyncAfter, DataRequest, PaginationParameters, ResponseFormat};

fn base_request() -> DataRequest {
    DataRequest::new(
        LogicalTable::new("wikipedia", "edits", Granularity::Grain(TimeGrain::Day)),
        Granularity::Grain(TimeGrain::Day),
        ["country"].iter().map(|s| s.to_string()).collect(),
        IndexMap::new(),
        ["pageViews", "added"].iter().map(|s| s.to_string()).collect(),
        vec![Interval::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        )],
        IndexSet::new(),
        IndexMap::new(),
        [
            SortDirective::time(SortDirection::Asc),
            SortDirective::metric("a", SortDirection::Asc),
            SortDirective::metric("b", SortDirection::Desc),
        ]
        .into_iter()
        .collect(),
        None,
        None,
        ResponseFormat::Json,
        None,
        Tz::UTC,
        AsyncAfter::Never,
        None,
    )
}

/// Assert that `derived` differs from `base` only where `expected` says so.
fn assert_only_differs(base: &DataRequest, derived: &DataRequest, expected: &DataRequest) {
    assert_eq!(derived, expected);
    // The receiver is untouched.
    assert_eq!(base, &base_request());
}

#[test]
fn test_with_table() {
    let base = base_request();
    let other = LogicalTable::new("edits_hourly", "hourly rollup", Granularity::All);
    let derived = base.with_table(other.clone());
    assert_eq!(derived.table(), &other);
    assert_eq!(derived.granularity(), base.granularity());
    assert_eq!(derived.all_sorts(), base.all_sorts());
    assert_eq!(base.table().name, "wikipedia");
}

#[test]
fn test_with_granularity() {
    let base = base_request();
    let derived = base.with_granularity(Granularity::All);
    assert_eq!(derived.granularity(), Granularity::All);
    assert_eq!(derived.table(), base.table());
    assert_eq!(derived.metrics(), base.metrics());
}

#[test]
fn test_with_dimensions() {
    let base = base_request();
    let new_dimensions: IndexSet<String> =
        ["country", "page"].iter().map(|s| s.to_string()).collect();
    let derived = base.with_dimensions(new_dimensions.clone());
    assert_eq!(derived.dimensions(), &new_dimensions);
    assert_eq!(base.dimensions().len(), 1);
    assert_eq!(derived.metrics(), base.metrics());
}

#[test]
fn test_with_dimension_fields() {
    let base = base_request();
    let mut fields = IndexMap::new();
    fields.insert(
        "country".to_string(),
        ["id"].iter().map(|s| s.to_string()).collect::<IndexSet<_>>(),
    );
    let derived = base.with_dimension_fields(fields.clone());
    assert_eq!(derived.dimension_fields(), &fields);
    assert!(base.dimension_fields().is_empty());
}

#[test]
fn test_with_metrics() {
    let base = base_request();
    let metrics: IndexSet<String> = ["deleted"].iter().map(|s| s.to_string()).collect();
    let derived = base.with_metrics(metrics.clone());
    assert_eq!(derived.metrics(), &metrics);
    assert_eq!(derived.dimensions(), base.dimensions());
}

#[test]
fn test_with_intervals() {
    let base = base_request();
    let intervals = vec![Interval::new(
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
    )];
    let derived = base.with_intervals(intervals.clone());
    assert_eq!(derived.intervals(), intervals.as_slice());
    assert_eq!(base.intervals().len(), 1);
    assert_ne!(base.intervals(), derived.intervals());
}

#[test]
fn test_with_filters() {
    let base = base_request();
    let filters: IndexSet<ApiFilter> = [ApiFilter::new(
        "country",
        "id",
        FilterOperation::NotIn,
        vec!["FR".to_string()],
    )]
    .into_iter()
    .collect();
    let derived = base.with_filters(filters.clone());
    assert_eq!(derived.filters(), &filters);
    assert!(base.filters().is_empty());
}

#[test]
fn test_with_havings() {
    let base = base_request();
    let mut havings = IndexMap::new();
    havings.insert(
        "added".to_string(),
        vec![Having::new(HavingOperation::LessThan, vec![10.0])],
    );
    let derived = base.with_havings(havings.clone());
    assert_eq!(derived.havings(), &havings);
    assert!(base.havings().is_empty());
}

#[test]
fn test_with_sorts_keeps_the_existing_time_sort() {
    let base = base_request();
    let derived = base.with_sorts(
        [
            SortDirective::metric("c", SortDirection::Asc),
            SortDirective::metric("d", SortDirection::Desc),
        ]
        .into_iter()
        .collect(),
    );

    let all: Vec<_> = derived.all_sorts().iter().cloned().collect();
    assert_eq!(
        all,
        vec![
            SortDirective::time(SortDirection::Asc),
            SortDirective::metric("c", SortDirection::Asc),
            SortDirective::metric("d", SortDirection::Desc),
        ]
    );
    // Receiver unchanged: still [time, a, b].
    assert_eq!(base.all_sorts().len(), 3);
    assert!(base.sorts().contains(&SortDirective::metric("a", SortDirection::Asc)));
}

#[test]
fn test_with_time_sort_keeps_the_existing_standard_sorts() {
    let base = base_request();
    let derived = base.with_time_sort(Some(SortDirective::time(SortDirection::Desc)));

    let all: Vec<_> = derived.all_sorts().iter().cloned().collect();
    assert_eq!(
        all,
        vec![
            SortDirective::time(SortDirection::Desc),
            SortDirective::metric("a", SortDirection::Asc),
            SortDirective::metric("b", SortDirection::Desc),
        ]
    );
}

#[test]
fn test_with_time_sort_none_clears_the_time_sort() {
    let base = base_request();
    let derived = base.with_time_sort(None);
    assert_eq!(derived.date_time_sort(), None);
    assert_eq!(derived.all_sorts().len(), 2);
    // Receiver still has its time sort.
    assert!(base.date_time_sort().is_some());
}

#[test]
fn test_with_sorts_cannot_introduce_a_second_time_sort() {
    let base = base_request();
    let derived = base.with_sorts(
        [
            SortDirective::time(SortDirection::Desc),
            SortDirective::metric("c", SortDirection::Asc),
        ]
        .into_iter()
        .collect(),
    );
    let time_sorts = derived.all_sorts().iter().filter(|s| s.is_time_sort()).count();
    assert_eq!(time_sorts, 1);
    // The original direction survives; the smuggled one is dropped.
    assert_eq!(
        derived.date_time_sort(),
        Some(&SortDirective::time(SortDirection::Asc))
    );
}

#[test]
fn test_with_all_sorts_replaces_verbatim() {
    let base = base_request();
    let all: IndexSet<SortDirective> = [SortDirective::metric("z", SortDirection::Asc)]
        .into_iter()
        .collect();
    let derived = base.with_all_sorts(all.clone());
    assert_eq!(derived.all_sorts(), &all);
    assert_eq!(derived.date_time_sort(), None);
}

#[test]
fn test_with_count_top_n_and_pagination() {
    let base = base_request();

    let derived = base.with_count(Some(100));
    assert_eq!(derived.count(), Some(100));
    assert_eq!(base.count(), None);

    let derived = base.with_top_n(Some(5));
    assert_eq!(derived.top_n(), Some(5));
    assert_eq!(derived.count(), None);

    let derived = base.with_pagination(Some(PaginationParameters::new(50, 2)));
    assert_eq!(derived.pagination(), Some(&PaginationParameters::new(50, 2)));
    assert_eq!(base.pagination(), None);
}

#[test]
fn test_with_format_and_download_filename() {
    let base = base_request();

    let derived = base.with_format(ResponseFormat::Csv);
    assert_eq!(derived.format(), ResponseFormat::Csv);
    assert_eq!(base.format(), ResponseFormat::Json);

    let derived = base.with_download_filename(Some("edits.csv".to_string()));
    assert_eq!(derived.download_filename(), Some("edits.csv"));
    assert_eq!(derived.format(), ResponseFormat::Json);
}

#[test]
fn test_with_time_zone_and_async_after() {
    let base = base_request();

    let derived = base.with_time_zone(Tz::America__New_York);
    assert_eq!(derived.time_zone(), Tz::America__New_York);
    assert_eq!(base.time_zone(), Tz::UTC);

    let derived = base.with_async_after(AsyncAfter::After(Duration::from_secs(30)));
    assert_eq!(
        derived.async_after(),
        AsyncAfter::After(Duration::from_secs(30))
    );
    assert_eq!(base.async_after(), AsyncAfter::Never);
}

#[test]
fn test_withers_compose_without_interference() {
    let base = base_request();
    let derived = base
        .with_count(Some(10))
        .with_format(ResponseFormat::Csv)
        .with_granularity(Granularity::All);

    let expected = {
        let step = base.with_count(Some(10));
        let step = step.with_format(ResponseFormat::Csv);
        step.with_granularity(Granularity::All)
    };
    assert_only_differs(&base, &derived, &expected);
}
