//! FILENAME: persistence/src/lib.rs
//! Customer Dashboard Persistence Module
//!
//! Handles loading the uploaded customer table from CSV and
//! re-serializing a filtered/sorted record set for download.

mod csv_reader;
mod csv_writer;
mod error;

pub use csv_reader::{load_csv, load_csv_path, parse_subscription_date};
pub use csv_writer::{export_csv, write_csv, DERIVED_COLUMNS};
pub use error::PersistenceError;

use serde::{Deserialize, Serialize};

// ============================================================================
// DOWNLOAD MIME TYPE
// ============================================================================

/// MIME type the presentation layer attaches to exported data.
pub const CSV_MIME_TYPE: &str = "text/csv";

// ============================================================================
// LOAD REPORT
// ============================================================================

/// A row rejected during load because its subscription date did not
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 0-based row index in the source data, excluding the header.
    pub source_row: u32,

    /// The raw cell text that failed to parse.
    pub value: String,
}

/// Outcome of a load: how many records made it in, and which rows were
/// dropped. The presentation layer can surface the skip count; a load
/// never fails because of a bad date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Number of records stored in the dataset.
    pub loaded: usize,

    /// Rows rejected for an unparseable subscription date.
    pub skipped_rows: Vec<SkippedRow>,
}

impl LoadReport {
    /// True if every source row was loaded.
    pub fn is_clean(&self) -> bool {
        self.skipped_rows.is_empty()
    }
}
