//! FILENAME: view-engine/src/definition.rs
//! View Parameters - The serializable configuration.
//!
//! This module contains the types that DESCRIBE what the user asked
//! for. These structures are designed to be:
//! - Serializable (for sending over the presentation bridge)
//! - Immutable snapshots of user intent
//!
//! A view is a pure function of (Dataset, ViewParameters); the
//! parameters carry no derived state.

use serde::{Deserialize, Serialize};

// ============================================================================
// SORT KEY
// ============================================================================

/// The column a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Chronological by parsed subscription date.
    SubscriptionDate,
    /// Lexicographic by country.
    Country,
    /// Lexicographic by company.
    Company,
}

// ============================================================================
// VIEW PARAMETERS
// ============================================================================

/// The user-chosen filter/sort configuration for the current display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParameters {
    /// Free-text search. Matches case-insensitively against ANY column.
    /// None or empty matches everything.
    #[serde(default)]
    pub search_query: Option<String>,

    /// Countries to keep. Empty means no country filtering.
    #[serde(default)]
    pub country_filter: Vec<String>,

    /// Sort column. None preserves the input order.
    #[serde(default)]
    pub sort_key: Option<SortKey>,

    /// Sort direction when `sort_key` is set.
    #[serde(default = "default_sort_ascending")]
    pub sort_ascending: bool,
}

fn default_sort_ascending() -> bool {
    true
}

impl Default for ViewParameters {
    fn default() -> Self {
        ViewParameters {
            search_query: None,
            country_filter: Vec::new(),
            sort_key: None,
            sort_ascending: true,
        }
    }
}

impl ViewParameters {
    /// Sets the free-text search query.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Sets the country filter.
    pub fn with_countries(mut self, countries: Vec<String>) -> Self {
        self.country_filter = countries;
        self
    }

    /// Sets the sort key and direction.
    pub fn with_sort(mut self, key: SortKey, ascending: bool) -> Self {
        self.sort_key = Some(key);
        self.sort_ascending = ascending;
        self
    }

    /// The effective search query: trimmed, lowercased, None when blank.
    pub fn normalized_query(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// True when neither search nor country filter is active.
    pub fn is_unfiltered(&self) -> bool {
        self.normalized_query().is_none() && self.country_filter.is_empty()
    }
}
