//! FILENAME: dataset/src/record.rs
//! Record and Dataset - the in-memory representation of an upload.
//!
//! A `Record` keeps every source cell as raw text (in source column
//! order) so that free-text search and export see exactly what was
//! uploaded, plus the parsed subscription date for chronological
//! operations. A `Dataset` is the immutable pairing of schema and
//! records, constructed once per upload and owned by the session that
//! loaded it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schema::DatasetSchema;

// ============================================================================
// RECORD
// ============================================================================

/// A single row from the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// The original row index in the source data (0-based, excluding header).
    pub source_row: u32,

    /// Raw cell text for each column, in source column order.
    pub values: Vec<String>,

    /// Parsed subscription date. Always valid: rows whose date fails to
    /// parse are rejected at load time.
    pub subscription_date: NaiveDate,
}

impl Record {
    /// Raw text of the cell in the given column, or "" if out of range.
    pub fn value(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// True if the (lowercased) query is a substring of ANY column's
    /// text. This is the OR-across-all-columns match used by the
    /// free-text search; the caller lowercases the query once.
    pub fn matches_lowercase_query(&self, query_lower: &str) -> bool {
        self.values
            .iter()
            .any(|v| v.to_lowercase().contains(query_lower))
    }

    /// Calendar year of the subscription date.
    pub fn subscription_year(&self) -> i32 {
        self.subscription_date.year()
    }

    /// Month-of-year (1-12) of the subscription date.
    pub fn subscription_month(&self) -> u32 {
        self.subscription_date.month()
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// An uploaded table: schema plus ordered records.
/// Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub schema: DatasetSchema,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(schema: DatasetSchema, records: Vec<Record>) -> Self {
        Dataset { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Country of a record, resolved through the schema.
    pub fn country<'a>(&self, record: &'a Record) -> &'a str {
        record.value(self.schema.recognized.country)
    }

    /// Company of a record, resolved through the schema.
    pub fn company<'a>(&self, record: &'a Record) -> &'a str {
        record.value(self.schema.recognized.company)
    }

    /// Second phone number of a record ("" when blank).
    pub fn phone2<'a>(&self, record: &'a Record) -> &'a str {
        record.value(self.schema.recognized.phone2)
    }

    /// Sorted unique country values, for the presentation layer's
    /// country select box.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .records
            .iter()
            .map(|r| self.country(r).to_string())
            .filter(|c| !c.trim().is_empty())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }
}
