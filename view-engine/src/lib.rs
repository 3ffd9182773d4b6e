//! FILENAME: view-engine/src/lib.rs
//! Dataset View Engine for the customer dashboard.
//!
//! Given an immutable `Dataset` and a set of `ViewParameters`, this
//! crate produces the filtered/sorted record set and the fixed
//! collection of named summaries the dashboard renders. Every
//! operation is a pure function of its declared inputs: the engine
//! holds no state, and a view is recomputed in full on each parameter
//! change.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the user ASKED for)
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: Calculation pipeline (HOW we compute)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::*;
pub use engine::{calculate_view, filter_records, sort_records, summarize};
pub use view::*;
