//! Error types for query construction.

use thiserror::Error;

use crate::fields::{FACETABLE_FIELDS, SearchField};

/// Errors that can occur while building a query.
///
/// Raised at build time, before any request is made, so the caller can
/// correct the query instead of burning an API call.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Field was requested as a facet but the API cannot facet on it
    #[error("field '{field}' is not facetable\n  Suggestion: use one of: {allowed}")]
    NotFacetable {
        /// The rejected field
        field: String,
        /// Comma-separated list of facetable fields
        allowed: String,
    },
}

impl QueryError {
    /// Creates a `NotFacetable` error naming the full allow-list.
    #[must_use]
    pub fn not_facetable(field: SearchField) -> Self {
        let allowed = FACETABLE_FIELDS
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::NotFacetable {
            field: field.as_str().to_string(),
            allowed,
        }
    }
}
