//! Error types for entity lookups.

use thiserror::Error;

use crate::client::ApiError;

/// Errors that can occur while resolving an entity reference.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Input was neither a data URI nor an entity path
    #[error(
        "invalid entity URI or path: '{uri}'\n  Suggestion: pass a full URI like http://data.europeana.eu/place/92 or a path like place/92"
    )]
    InvalidUri {
        /// The rejected input
        uri: String,
    },

    /// The Entity API request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl EntityError {
    /// Creates an `InvalidUri` error for the given input.
    #[must_use]
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri { uri: uri.into() }
    }
}

// ==================== Tests ====================
