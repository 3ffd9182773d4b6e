//! FILENAME: dataset/src/schema.rs
//! Dataset Schema - column layout of an uploaded table.
//!
//! The schema records the full ordered column set of the source table
//! plus the resolved positions of the columns the engine understands.
//! Columns outside the recognized set are opaque pass-through: they are
//! kept for search and export but never interpreted.

use serde::{Deserialize, Serialize};

// ============================================================================
// RECOGNIZED COLUMN NAMES
// ============================================================================

pub const COLUMN_FIRST_NAME: &str = "First Name";
pub const COLUMN_LAST_NAME: &str = "Last Name";
pub const COLUMN_COMPANY: &str = "Company";
pub const COLUMN_COUNTRY: &str = "Country";
pub const COLUMN_PHONE_1: &str = "Phone 1";
pub const COLUMN_PHONE_2: &str = "Phone 2";
pub const COLUMN_SUBSCRIPTION_DATE: &str = "Subscription Date";

/// Columns that must be present for a table to load.
/// A missing entry is a schema error and blocks the whole upload.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COLUMN_FIRST_NAME,
    COLUMN_LAST_NAME,
    COLUMN_COMPANY,
    COLUMN_COUNTRY,
    COLUMN_PHONE_1,
    COLUMN_PHONE_2,
    COLUMN_SUBSCRIPTION_DATE,
];

// ============================================================================
// RESOLVED COLUMN INDICES
// ============================================================================

/// Positions of the recognized columns within the source column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaColumns {
    pub first_name: usize,
    pub last_name: usize,
    pub company: usize,
    pub country: usize,
    pub phone1: usize,
    pub phone2: usize,
    pub subscription_date: usize,
}

// ============================================================================
// SCHEMA
// ============================================================================

/// The column layout of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSchema {
    /// All column names in source order (pass-through columns included).
    pub columns: Vec<String>,

    /// Resolved indices of the recognized columns.
    pub recognized: SchemaColumns,
}

impl DatasetSchema {
    /// Resolves a schema from a header row.
    /// Returns the name of the first missing required column on failure.
    pub fn from_headers(headers: &[String]) -> Result<Self, String> {
        let find = |name: &str| -> Result<usize, String> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| name.to_string())
        };

        let recognized = SchemaColumns {
            first_name: find(COLUMN_FIRST_NAME)?,
            last_name: find(COLUMN_LAST_NAME)?,
            company: find(COLUMN_COMPANY)?,
            country: find(COLUMN_COUNTRY)?,
            phone1: find(COLUMN_PHONE_1)?,
            phone2: find(COLUMN_PHONE_2)?,
            subscription_date: find(COLUMN_SUBSCRIPTION_DATE)?,
        };

        Ok(DatasetSchema {
            columns: headers.to_vec(),
            recognized,
        })
    }

    /// Number of source columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
