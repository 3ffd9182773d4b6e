//! FILENAME: dataset/src/lib.rs
//! Core data model for the customer dashboard.
//!
//! This crate provides the shared types that the view engine and the
//! persistence layer operate on. It performs no I/O: a `Dataset` is
//! built once per upload by the persistence crate and is immutable
//! thereafter. All derived state (filtered views, summaries) lives in
//! the `view-engine` crate and is recomputed from the dataset.

pub mod record;
pub mod schema;

pub use record::{Dataset, Record};
pub use schema::{DatasetSchema, SchemaColumns, COLUMN_COMPANY, COLUMN_COUNTRY,
    COLUMN_FIRST_NAME, COLUMN_LAST_NAME, COLUMN_PHONE_1, COLUMN_PHONE_2,
    COLUMN_SUBSCRIPTION_DATE, REQUIRED_COLUMNS};
