//! FILENAME: persistence/src/csv_reader.rs
//! CSV loader - builds a Dataset from an uploaded table.
//!
//! Load is the only blocking validation point: a missing required
//! column fails the whole upload, while a row whose subscription date
//! does not parse is dropped, logged, and reported back to the caller.
//! Every record that makes it into the Dataset therefore carries a
//! valid date.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use dataset::{Dataset, DatasetSchema, Record};

use crate::error::PersistenceError;
use crate::{LoadReport, SkippedRow};

/// Date formats accepted for the subscription date, tried in order.
/// Ambiguous day/month forms resolve to the US order used by the
/// source datasets.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Parses a subscription date cell. Returns None when no accepted
/// format matches.
pub fn parse_subscription_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Loads a customer table from any reader producing CSV with a header
/// row.
pub fn load_csv<R: Read>(reader: R) -> Result<(Dataset, LoadReport), PersistenceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let schema =
        DatasetSchema::from_headers(&headers).map_err(PersistenceError::MissingColumn)?;
    let date_col = schema.recognized.subscription_date;
    let column_count = schema.column_count();

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (row_idx, result) in csv_reader.records().enumerate() {
        let row = result?;
        let source_row = row_idx as u32;

        let mut values: Vec<String> = row.iter().map(str::to_string).collect();
        // Ragged rows are padded so column indices stay valid.
        values.resize(column_count, String::new());

        match parse_subscription_date(&values[date_col]) {
            Some(date) => records.push(Record {
                source_row,
                values,
                subscription_date: date,
            }),
            None => {
                log::warn!(
                    "dropping row {}: unparseable subscription date {:?}",
                    source_row,
                    values[date_col]
                );
                report.skipped_rows.push(SkippedRow {
                    source_row,
                    value: values[date_col].clone(),
                });
            }
        }
    }

    report.loaded = records.len();
    Ok((Dataset::new(schema, records), report))
}

/// Loads a customer table from a CSV file on disk.
pub fn load_csv_path(path: &Path) -> Result<(Dataset, LoadReport), PersistenceError> {
    let file = File::open(path)?;
    load_csv(BufReader::new(file))
}
