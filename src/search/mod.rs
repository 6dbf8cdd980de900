//! Search page model and cursor pagination.
//!
//! # Overview
//! One search request returns a [`SearchPage`]: a bounded window of
//! results plus an opaque continuation cursor. [`page_stream`] chains
//! page fetches into a single lazy stream of items, handling cursor
//! advancement, page-size clamping, record budgets and termination.
//!
//! # Architecture
//! The engine talks to the transport only through the [`FetchPage`]
//! trait, so the same state machine drives typed and raw result streams
//! and can be tested against scripted fetchers without a server.

mod pager;

pub use pager::{MAX_CONSECUTIVE_EMPTY_PAGES, page_stream};

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::ApiError;
use crate::query::SearchRequest;

/// Cursor value that selects the first page of a result set.
pub const CURSOR_START: &str = "*";

/// One page of search results.
///
/// `query` echoes the compiled query string that produced the page; it
/// is filled in client-side, not decoded from the response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchPage<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Facet summaries, present only when the request asked for facets.
    #[serde(default)]
    pub facets: Option<Vec<Facet>>,
    #[serde(skip)]
    pub query: Option<String>,
}

impl<T> SearchPage<T> {
    /// Number of items in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Value counts for one facet field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Facet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FacetField>,
}

/// One value bucket within a facet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacetField {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub count: u64,
}

/// Boundary between the pagination engine and the transport.
///
/// A non-success response must surface as an `Err`, never as a silent
/// empty page; the engine treats errors and exhaustion as distinct
/// outcomes.
#[async_trait]
pub trait FetchPage<T>: Send + Sync {
    /// Fetches the page of `request` selected by `cursor`.
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<T>, ApiError>;
}
