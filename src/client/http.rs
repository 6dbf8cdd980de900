//! Shared HTTP client construction policy.
//!
//! Centralizes networking defaults so Search and Entity API traffic stays
//! consistent on timeout, user-agent, and compression.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::ApiError;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Builds the API HTTP client using shared project policy.
///
/// # Errors
///
/// Returns [`ApiError::Http`] when client construction fails.
pub(crate) fn build_api_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(user_agent::default_api_user_agent())
        .gzip(true)
        .build()
        .map_err(ApiError::Http)
}
