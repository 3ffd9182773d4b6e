//! FILENAME: view-engine/src/engine.rs
//! View Engine - The calculation pipeline.
//!
//! This module takes a Dataset (data) and ViewParameters (configuration)
//! and produces a DatasetView (records plus summaries, ready for
//! rendering).
//!
//! Pipeline:
//! 1. Filter: free-text search AND country membership, order preserved
//! 2. Summarize: derive every named series from the filtered set
//! 3. Sort: stable sort of the record list by the requested key
//!
//! Summaries are computed before the user sort is applied so that
//! order-sensitive series (oldest subscriptions) break ties by original
//! input order regardless of the current sort key.

use std::cmp::Ordering;

use dataset::{Dataset, DatasetSchema, Record};
use rustc_hash::FxHashMap;

use crate::definition::{SortKey, ViewParameters};
use crate::view::{
    DatasetView, KeyCount, MonthCount, MonthYearCount, ViewSummaries, YearCount,
    OLDEST_SUBSCRIPTION_COUNT, TOP_COMPANY_COUNT,
};

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Runs the full pipeline. Pure function of (dataset, params);
/// the presentation layer calls this on every parameter change.
pub fn calculate_view(dataset: &Dataset, params: &ViewParameters) -> DatasetView {
    let mut records = filter_records(&dataset.records, &dataset.schema, params);

    let summaries = summarize(&records, &dataset.schema);

    if let Some(key) = params.sort_key {
        sort_records(&mut records, &dataset.schema, key, params.sort_ascending);
    }

    DatasetView {
        total_count: records.len(),
        records,
        summaries,
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// Applies the free-text search and the country filter, ANDed.
/// Relative order of the input is preserved. Idempotent: re-applying
/// the same parameters to its own output yields the same records.
pub fn filter_records(
    records: &[Record],
    schema: &DatasetSchema,
    params: &ViewParameters,
) -> Vec<Record> {
    if params.is_unfiltered() {
        return records.to_vec();
    }

    let query = params.normalized_query();
    let country_col = schema.recognized.country;

    records
        .iter()
        .filter(|record| {
            if let Some(ref q) = query {
                if !record.matches_lowercase_query(q) {
                    return false;
                }
            }
            params.country_filter.is_empty()
                || params
                    .country_filter
                    .iter()
                    .any(|c| c == record.value(country_col))
        })
        .cloned()
        .collect()
}

// ============================================================================
// SORT
// ============================================================================

/// Stable sort by the chosen key: chronological for the subscription
/// date, lexicographic for country/company. Descending reverses the
/// comparator, not the slice, so equal keys keep their pre-sort
/// relative order.
pub fn sort_records(
    records: &mut [Record],
    schema: &DatasetSchema,
    key: SortKey,
    ascending: bool,
) {
    let compare = |a: &Record, b: &Record| -> Ordering {
        match key {
            SortKey::SubscriptionDate => a.subscription_date.cmp(&b.subscription_date),
            SortKey::Country => a
                .value(schema.recognized.country)
                .cmp(b.value(schema.recognized.country)),
            SortKey::Company => a
                .value(schema.recognized.company)
                .cmp(b.value(schema.recognized.company)),
        }
    };

    if ascending {
        records.sort_by(compare);
    } else {
        records.sort_by(|a, b| compare(b, a));
    }
}

// ============================================================================
// SUMMARIZE
// ============================================================================

/// Derives every named summary series from the (filtered) record set.
/// An empty input degrades to empty series, never an error.
pub fn summarize(records: &[Record], schema: &DatasetSchema) -> ViewSummaries {
    if records.is_empty() {
        return ViewSummaries::empty();
    }

    ViewSummaries {
        counts_by_country: counts_by_column(records, schema.recognized.country, None),
        counts_by_company: counts_by_column(
            records,
            schema.recognized.company,
            Some(TOP_COMPANY_COUNT),
        ),
        subscriptions_by_year: subscriptions_by_year(records),
        subscriptions_by_month_year: subscriptions_by_month_year(records),
        subscriptions_by_month: subscriptions_by_month(records),
        oldest_subscriptions: oldest_subscriptions(records),
        multi_phone_records: multi_phone_records(records, schema),
    }
}

/// Groups records by a column's value and counts, descending by count
/// with the key ascending on ties (a deterministic total order; the
/// group map iterates in unspecified order). `cap` truncates to a
/// top-N ranking.
fn counts_by_column(records: &[Record], column: usize, cap: Option<usize>) -> Vec<KeyCount> {
    let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
    for record in records {
        *counts.entry(record.value(column)).or_insert(0) += 1;
    }

    let mut series: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();
    series.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    if let Some(cap) = cap {
        series.truncate(cap);
    }
    series
}

/// Subscriptions per calendar year, ascending by year.
fn subscriptions_by_year(records: &[Record]) -> Vec<YearCount> {
    let mut counts: FxHashMap<i32, u64> = FxHashMap::default();
    for record in records {
        *counts.entry(record.subscription_year()).or_insert(0) += 1;
    }

    let mut series: Vec<YearCount> = counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();
    series.sort_by_key(|e| e.year);
    series
}

/// Subscriptions per (year, month), chronological. This is the
/// growth-rate-over-time series.
fn subscriptions_by_month_year(records: &[Record]) -> Vec<MonthYearCount> {
    let mut counts: FxHashMap<(i32, u32), u64> = FxHashMap::default();
    for record in records {
        let key = (record.subscription_year(), record.subscription_month());
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut series: Vec<MonthYearCount> = counts
        .into_iter()
        .map(|((year, month), count)| MonthYearCount { year, month, count })
        .collect();
    series.sort_by_key(|e| (e.year, e.month));
    series
}

/// Subscriptions per month-of-year across all years. Every month 1-12
/// appears, zero counts included.
fn subscriptions_by_month(records: &[Record]) -> Vec<MonthCount> {
    let mut counts = [0u64; 12];
    for record in records {
        counts[record.subscription_month() as usize - 1] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| MonthCount {
            month: i as u32 + 1,
            count,
        })
        .collect()
}

/// The records with the smallest subscription dates, ascending.
/// The stable sort breaks date ties by the input order.
fn oldest_subscriptions(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.subscription_date);
    sorted.truncate(OLDEST_SUBSCRIPTION_COUNT);
    sorted
}

/// Records with a non-blank second phone number.
fn multi_phone_records(records: &[Record], schema: &DatasetSchema) -> Vec<Record> {
    records
        .iter()
        .filter(|r| !r.value(schema.recognized.phone2).trim().is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // ========================================================================
    // FIXTURES
    // ========================================================================

    fn test_schema() -> DatasetSchema {
        let headers: Vec<String> = [
            "First Name",
            "Last Name",
            "Company",
            "Country",
            "Phone 1",
            "Phone 2",
            "Subscription Date",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        DatasetSchema::from_headers(&headers).unwrap()
    }

    fn record(
        row: u32,
        first: &str,
        company: &str,
        country: &str,
        phone2: &str,
        date: &str,
    ) -> Record {
        Record {
            source_row: row,
            values: vec![
                first.to_string(),
                format!("Last{}", row),
                company.to_string(),
                country.to_string(),
                "555-0100".to_string(),
                phone2.to_string(),
                date.to_string(),
            ],
            subscription_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample_dataset() -> Dataset {
        let records = vec![
            record(0, "Jane", "Acme Corp", "US", "", "2020-03-01"),
            record(1, "Omar", "Globex", "US", "555-0199", "2021-03-15"),
            record(2, "Lena", "Initech", "FR", "", "2020-07-01"),
        ];
        Dataset::new(test_schema(), records)
    }

    // ========================================================================
    // FILTER
    // ========================================================================

    #[test]
    fn test_unfiltered_returns_all_in_order() {
        let dataset = sample_dataset();
        let filtered =
            filter_records(&dataset.records, &dataset.schema, &ViewParameters::default());

        assert_eq!(filtered.len(), 3);
        let rows: Vec<u32> = filtered.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_country_filter_preserves_order() {
        let dataset = sample_dataset();
        let params = ViewParameters::default().with_countries(vec!["US".to_string()]);
        let filtered = filter_records(&dataset.records, &dataset.schema, &params);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].source_row, 0);
        assert_eq!(filtered[1].source_row, 1);
    }

    #[test]
    fn test_search_matches_any_column_case_insensitive() {
        let dataset = sample_dataset();
        let params = ViewParameters::default().with_search("acme");
        let filtered = filter_records(&dataset.records, &dataset.schema, &params);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].value(2), "Acme Corp");

        // A last-name match goes through the same all-column predicate
        let params = ViewParameters::default().with_search("last2");
        let filtered = filter_records(&dataset.records, &dataset.schema, &params);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].source_row, 2);
    }

    #[test]
    fn test_search_and_country_are_anded() {
        let dataset = sample_dataset();
        let params = ViewParameters::default()
            .with_search("globex")
            .with_countries(vec!["FR".to_string()]);
        let filtered = filter_records(&dataset.records, &dataset.schema, &params);

        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dataset = sample_dataset();
        let params = ViewParameters::default()
            .with_search("20")
            .with_countries(vec!["US".to_string()]);

        let once = filter_records(&dataset.records, &dataset.schema, &params);
        let twice = filter_records(&once, &dataset.schema, &params);
        assert_eq!(once, twice);
    }

    // ========================================================================
    // SORT
    // ========================================================================

    #[test]
    fn test_sort_by_date_chronological() {
        let dataset = sample_dataset();
        let mut records = dataset.records.clone();
        sort_records(&mut records, &dataset.schema, SortKey::SubscriptionDate, true);

        let rows: Vec<u32> = records.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![0, 2, 1]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let schema = test_schema();
        let mut records = vec![
            record(0, "A", "Zeta", "US", "", "2020-01-01"),
            record(1, "B", "Alpha", "US", "", "2020-01-02"),
            record(2, "C", "Beta", "US", "", "2020-01-03"),
            record(3, "D", "Gamma", "FR", "", "2020-01-04"),
        ];

        sort_records(&mut records, &schema, SortKey::Country, true);
        // FR first, then the three US rows in their original order
        let rows: Vec<u32> = records.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_descending_sort_keeps_tie_order() {
        let schema = test_schema();
        let mut records = vec![
            record(0, "A", "Zeta", "US", "", "2020-01-01"),
            record(1, "B", "Alpha", "FR", "", "2020-01-02"),
            record(2, "C", "Beta", "US", "", "2020-01-03"),
        ];

        sort_records(&mut records, &schema, SortKey::Country, false);
        // US rows first (descending), keeping 0 before 2
        let rows: Vec<u32> = records.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![0, 2, 1]);
    }

    // ========================================================================
    // SUMMARIZE
    // ========================================================================

    #[test]
    fn test_counts_by_country_sums_to_len() {
        let dataset = sample_dataset();
        let summaries = summarize(&dataset.records, &dataset.schema);

        let total: u64 = summaries.counts_by_country.iter().map(|e| e.count).sum();
        assert_eq!(total, dataset.records.len() as u64);

        assert_eq!(summaries.counts_by_country[0].key, "US");
        assert_eq!(summaries.counts_by_country[0].count, 2);
        assert_eq!(summaries.counts_by_country[1].key, "FR");
    }

    #[test]
    fn test_counts_reflect_filtered_set() {
        let dataset = sample_dataset();
        let params = ViewParameters::default().with_countries(vec!["US".to_string()]);
        let view = calculate_view(&dataset, &params);

        assert_eq!(view.summaries.counts_by_country.len(), 1);
        assert_eq!(view.summaries.counts_by_country[0].key, "US");
        assert_eq!(view.summaries.counts_by_country[0].count, 2);
    }

    #[test]
    fn test_company_ranking_capped_at_top_10() {
        let schema = test_schema();
        let mut records = Vec::new();
        // 12 companies, "Company00" appearing twice so it ranks first
        for i in 0..13u32 {
            let company = format!("Company{:02}", i.min(12) % 12);
            records.push(record(i, "X", &company, "US", "", "2020-01-01"));
        }

        let summaries = summarize(&records, &schema);
        assert_eq!(summaries.counts_by_company.len(), TOP_COMPANY_COUNT);
        assert_eq!(summaries.counts_by_company[0].key, "Company00");
        assert_eq!(summaries.counts_by_company[0].count, 2);
    }

    #[test]
    fn test_subscriptions_by_year_ascending() {
        let dataset = sample_dataset();
        let summaries = summarize(&dataset.records, &dataset.schema);

        let series: Vec<(i32, u64)> = summaries
            .subscriptions_by_year
            .iter()
            .map(|e| (e.year, e.count))
            .collect();
        assert_eq!(series, vec![(2020, 2), (2021, 1)]);
    }

    #[test]
    fn test_subscriptions_by_month_year_chronological() {
        let schema = test_schema();
        let records = vec![
            record(0, "A", "X", "US", "", "2021-01-05"),
            record(1, "B", "X", "US", "", "2020-12-20"),
            record(2, "C", "X", "US", "", "2020-12-01"),
        ];

        let summaries = summarize(&records, &schema);
        let series: Vec<(i32, u32, u64)> = summaries
            .subscriptions_by_month_year
            .iter()
            .map(|e| (e.year, e.month, e.count))
            .collect();
        assert_eq!(series, vec![(2020, 12, 2), (2021, 1, 1)]);
    }

    #[test]
    fn test_months_always_twelve_entries() {
        let dataset = sample_dataset();
        let summaries = summarize(&dataset.records, &dataset.schema);

        assert_eq!(summaries.subscriptions_by_month.len(), 12);
        let total: u64 = summaries.subscriptions_by_month.iter().map(|e| e.count).sum();
        assert_eq!(total, dataset.records.len() as u64);

        // March saw two subscriptions (2020-03 and 2021-03), July one
        assert_eq!(summaries.subscriptions_by_month[2].count, 2);
        assert_eq!(summaries.subscriptions_by_month[6].count, 1);
        assert_eq!(summaries.subscriptions_by_month[0].count, 0);
    }

    #[test]
    fn test_oldest_subscriptions_tie_break_by_input_order() {
        let schema = test_schema();
        let mut records = Vec::new();
        for i in 0..12u32 {
            // Rows 0 and 1 share the earliest date
            let date = if i < 2 { "2019-01-01" } else { "2020-01-01" };
            records.push(record(i, "X", "Y", "US", "", date));
        }

        let summaries = summarize(&records, &schema);
        assert_eq!(summaries.oldest_subscriptions.len(), OLDEST_SUBSCRIPTION_COUNT);
        assert_eq!(summaries.oldest_subscriptions[0].source_row, 0);
        assert_eq!(summaries.oldest_subscriptions[1].source_row, 1);
        assert_eq!(summaries.oldest_subscriptions[2].source_row, 2);
    }

    #[test]
    fn test_multi_phone_records() {
        let dataset = sample_dataset();
        let summaries = summarize(&dataset.records, &dataset.schema);

        assert_eq!(summaries.multi_phone_records.len(), 1);
        assert_eq!(summaries.multi_phone_records[0].source_row, 1);
    }

    #[test]
    fn test_empty_result_degrades_gracefully() {
        let dataset = sample_dataset();
        let params = ViewParameters::default().with_search("no such customer anywhere");
        let view = calculate_view(&dataset, &params);

        assert_eq!(view.total_count, 0);
        assert!(view.records.is_empty());
        assert!(view.summaries.counts_by_country.is_empty());
        assert_eq!(view.summaries.subscriptions_by_month.len(), 12);
    }

    // ========================================================================
    // FULL PIPELINE
    // ========================================================================

    #[test]
    fn test_calculate_view_sorts_after_summarizing() {
        let dataset = sample_dataset();
        let params =
            ViewParameters::default().with_sort(SortKey::SubscriptionDate, false);
        let view = calculate_view(&dataset, &params);

        // Records are sorted descending by date...
        let rows: Vec<u32> = view.records.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![1, 2, 0]);

        // ...while the oldest-subscriptions table still leads with the
        // earliest date.
        assert_eq!(view.summaries.oldest_subscriptions[0].source_row, 0);
    }

    #[test]
    fn test_view_is_pure_recomputation() {
        let dataset = sample_dataset();
        let params = ViewParameters::default().with_countries(vec!["US".to_string()]);

        let first = calculate_view(&dataset, &params);
        let second = calculate_view(&dataset, &params);

        assert_eq!(first.records, second.records);
        assert_eq!(
            first.summaries.counts_by_country,
            second.summaries.counts_by_country
        );
    }
}
