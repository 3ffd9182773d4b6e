//! FILENAME: view-engine/src/view.rs
//! Dataset View - Renderable output for the frontend.
//!
//! This module contains the result of one pipeline run: the
//! filtered/sorted record sequence plus every named summary series the
//! dashboard charts and tables are drawn from. The view has no
//! persisted identity; it is recomputed whenever the parameters change.

use dataset::Record;
use serde::{Deserialize, Serialize};

// ============================================================================
// DISPLAY LIMITS
// ============================================================================

/// Maximum number of rows handed to the data table for display.
/// The full record set stays available for export.
pub const DISPLAY_ROW_CAP: usize = 1000;

/// Size of the top-companies ranking.
pub const TOP_COMPANY_COUNT: usize = 10;

/// Size of the oldest-subscriptions table.
pub const OLDEST_SUBSCRIPTION_COUNT: usize = 10;

// ============================================================================
// SUMMARY SERIES ENTRIES
// ============================================================================

/// One (key, count) entry of a categorical series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCount {
    pub key: String,
    pub count: u64,
}

/// One (year, count) entry of the yearly trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// One (month-of-year, count) entry. Months run 1-12 and every month
/// is present, zero counts included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    pub month: u32,
    pub count: u64,
}

/// One ((year, month), count) entry of the growth-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthYearCount {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

impl MonthYearCount {
    /// "YYYY-MM" axis label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

/// The fixed collection of named summaries, all derived from the
/// FILTERED record set so they reflect the current parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummaries {
    /// Customers per country, count descending (country ascending on
    /// ties). Uncapped; the consumer may keep only the top N.
    pub counts_by_country: Vec<KeyCount>,

    /// Top companies by customer count, capped at [`TOP_COMPANY_COUNT`].
    pub counts_by_company: Vec<KeyCount>,

    /// Subscriptions per calendar year, ascending by year.
    pub subscriptions_by_year: Vec<YearCount>,

    /// Subscriptions per (year, month), chronological.
    pub subscriptions_by_month_year: Vec<MonthYearCount>,

    /// Subscriptions per month-of-year across all years, months 1-12.
    pub subscriptions_by_month: Vec<MonthCount>,

    /// The records with the smallest subscription dates, ascending,
    /// ties broken by original input order.
    pub oldest_subscriptions: Vec<Record>,

    /// Records with a second phone number on file.
    pub multi_phone_records: Vec<Record>,
}

impl ViewSummaries {
    /// Summaries of an empty record set: empty series everywhere except
    /// the month distribution, which still carries its 12 zero entries.
    pub fn empty() -> Self {
        ViewSummaries {
            counts_by_country: Vec::new(),
            counts_by_company: Vec::new(),
            subscriptions_by_year: Vec::new(),
            subscriptions_by_month_year: Vec::new(),
            subscriptions_by_month: (1..=12).map(|month| MonthCount { month, count: 0 }).collect(),
            oldest_subscriptions: Vec::new(),
            multi_phone_records: Vec::new(),
        }
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete result of one Filter -> Sort -> Summarize run.
/// This is what gets sent to the frontend for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetView {
    /// The filtered and sorted record set, uncapped (export uses this).
    pub records: Vec<Record>,

    /// Number of records that matched the filters.
    pub total_count: usize,

    /// The named summary series.
    pub summaries: ViewSummaries,
}

impl DatasetView {
    /// The rows the data table should render, capped at
    /// [`DISPLAY_ROW_CAP`].
    pub fn display_records(&self) -> &[Record] {
        let cap = self.records.len().min(DISPLAY_ROW_CAP);
        &self.records[..cap]
    }

    /// True if the display is truncated relative to the match count.
    pub fn is_truncated(&self) -> bool {
        self.records.len() > DISPLAY_ROW_CAP
    }
}
