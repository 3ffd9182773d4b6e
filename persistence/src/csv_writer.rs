//! FILENAME: persistence/src/csv_writer.rs
//! CSV exporter - re-serializes a filtered/sorted record set.
//!
//! Export preserves the source column order and appends the derived
//! date columns the dashboard adds for its summaries (year, month,
//! month-year). On a re-load the derived columns come back as opaque
//! pass-through columns.

use std::io::Write;

use dataset::{DatasetSchema, Record};

use crate::error::PersistenceError;

/// Derived columns appended after the source columns.
pub const DERIVED_COLUMNS: [&str; 3] = [
    "Subscription Year",
    "Subscription Month",
    "Subscription Month-Year",
];

/// Writes the record set as CSV to the given writer.
pub fn write_csv<W: Write>(
    schema: &DatasetSchema,
    records: &[Record],
    writer: W,
) -> Result<(), PersistenceError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = schema.columns.iter().map(String::as_str).collect();
    header.extend(DERIVED_COLUMNS);
    csv_writer.write_record(&header)?;

    let column_count = schema.column_count();
    for record in records {
        let mut row: Vec<String> = record.values.clone();
        row.resize(column_count, String::new());
        row.push(record.subscription_year().to_string());
        row.push(record.subscription_month().to_string());
        row.push(format!(
            "{:04}-{:02}",
            record.subscription_year(),
            record.subscription_month()
        ));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Serializes the record set to CSV bytes, ready for download with
/// [`crate::CSV_MIME_TYPE`]. The full set is written; the display row
/// cap does not apply to exports.
pub fn export_csv(
    schema: &DatasetSchema,
    records: &[Record],
) -> Result<Vec<u8>, PersistenceError> {
    let mut buffer = Vec::new();
    write_csv(schema, records, &mut buffer)?;
    Ok(buffer)
}
