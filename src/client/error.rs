//! Error types for Search and Entity API transport.

use thiserror::Error;

/// Errors that can occur while talking to the HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the connection failed mid-flight
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status
    #[error("API returned status {status}: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Human-readable explanation of the status
        reason: String,
    },

    /// The response body did not match the expected JSON shape
    #[error("failed to decode API response: {reason}")]
    Decode {
        /// What went wrong during decoding
        reason: String,
    },

    /// A configured endpoint URL is malformed
    #[error("invalid endpoint URL: {url}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
    },
}

impl ApiError {
    /// Creates a `Status` error with a reason derived from the status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        let reason = match status {
            400 => "the query or request parameters were rejected\n  Suggestion: check the query syntax and parameter values",
            401 => "the API key is missing or invalid\n  Suggestion: register a key at https://pro.europeana.eu/get-api",
            403 => "the API key is not allowed to access this resource",
            404 => "the requested resource does not exist",
            429 => "rate limit exceeded\n  Suggestion: slow down or retry after a pause",
            500..=599 => "the API service is unavailable or failing",
            _ => "unexpected response status",
        };
        Self::Status {
            status,
            reason: reason.to_string(),
        }
    }

    /// Creates a `Decode` error from any displayable cause.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an invalid endpoint URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

/// Splits a `reqwest` failure into decode and transport halves.
///
/// `reqwest` reports JSON body mismatches through the same error type as
/// connection failures, so responses read with `.json()` need this to keep
/// the two cases distinguishable for callers.
pub(crate) fn decode_or_transport(error: reqwest::Error) -> ApiError {
    if error.is_decode() {
        ApiError::decode(error.to_string())
    } else {
        ApiError::Http(error)
    }
}

// ==================== Tests ====================
