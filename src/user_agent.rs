//! Shared User-Agent string for Search and Entity API traffic.
//!
//! Single source for project URL and UA format so all outgoing requests
//! stay consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/europeana-rs";

/// Default User-Agent for API requests (identifies the tool).
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("europeana-rs/{version} (cultural-heritage-client; +{PROJECT_UA_URL})")
}
