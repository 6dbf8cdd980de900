//! HTTP client for the Search and Entity APIs.
//!
//! # Overview
//!
//! [`Client`] owns a pooled `reqwest` client configured with project-wide
//! networking policy (timeouts, user-agent, gzip) and speaks both API
//! surfaces: cursor-paged search and single-entity retrieval. Single-page
//! calls return [`SearchPage`]; `search_all` wraps them in a lazy stream
//! that walks the cursor chain.
//!
//! # Example
//!
//! ```no_run
//! use europeana::{CURSOR_START, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("your-api-key")?;
//! let request = client.query().who("Vincent van Gogh").build();
//! let page = client.search(&request, CURSOR_START).await?;
//! println!("{} of {} results", page.len(), page.total_results);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The client implements [`FetchPage`] twice, once for typed [`Record`]
//! items and once for raw [`serde_json::Value`] items, so the pagination
//! engine in [`crate::search`] stays independent of HTTP concerns and both
//! decode modes share one wire path.

pub mod error;
mod http;

pub use error::ApiError;
use error::decode_or_transport;

use async_trait::async_trait;
use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::entity::{self, EntityError, PlaceEntity, PlaceLookup};
use crate::query::{MAX_ROWS, QueryBuilder, SearchRequest};
use crate::records::Record;
use crate::search::{FetchPage, SearchPage, page_stream};

/// Production Search API endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.europeana.eu/record/v2/search.json";

/// Production Entity API base URL (entity paths are appended).
pub const DEFAULT_ENTITY_URL: &str = "https://api.europeana.eu/entity";

/// Wire query sent when a request has no text and no filters.
pub const MATCH_ALL_QUERY: &str = "*:*";

/// Client for the metadata Search and Entity APIs.
///
/// Create once and reuse; the underlying connection pool is shared across
/// all calls. Cloning is cheap and clones share the pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    search_url: String,
    entity_url: String,
}

impl Client {
    /// Creates a client against the production API endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_urls(api_key, DEFAULT_SEARCH_URL, DEFAULT_ENTITY_URL)
    }

    /// Creates a client against custom endpoints.
    ///
    /// Used by tests pointing at a local mock server and by deployments
    /// that route through an API gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when an endpoint does not parse
    /// and [`ApiError::Http`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn with_base_urls(
        api_key: impl Into<String>,
        search_url: impl Into<String>,
        entity_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let search_url = search_url.into();
        let entity_url = entity_url.into();
        for base in [&search_url, &entity_url] {
            Url::parse(base).map_err(|_| ApiError::invalid_url(base.clone()))?;
        }
        Ok(Self {
            http: http::build_api_http_client()?,
            api_key: api_key.into(),
            search_url,
            entity_url,
        })
    }

    /// Starts a new query builder for fluent request construction.
    #[must_use]
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new()
    }

    // ==================== Search API ====================

    /// Fetches a single page of typed records.
    ///
    /// Pass [`crate::CURSOR_START`] for the first page, then the page's
    /// `next_cursor` for each one after it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or a
    /// response body that does not decode.
    #[instrument(skip(self, request), fields(query = %request.query(), cursor = %cursor))]
    pub async fn search(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<Record>, ApiError> {
        self.fetch_search_page(request, cursor).await
    }

    /// Fetches a single page with items left as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or a
    /// response body that does not decode.
    #[instrument(skip(self, request), fields(query = %request.query(), cursor = %cursor))]
    pub async fn search_raw(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<Value>, ApiError> {
        self.fetch_search_page(request, cursor).await
    }

    /// Streams every typed record in the result set of `request`.
    ///
    /// Pages are fetched lazily as the stream is polled; `max_records`
    /// caps the total number of items yielded. A transport failure ends
    /// the stream after yielding the error.
    pub fn search_all<'a>(
        &'a self,
        request: &SearchRequest,
        max_records: Option<usize>,
    ) -> impl Stream<Item = Result<Record, ApiError>> + 'a {
        page_stream::<Record, _>(self, request.clone(), max_records)
    }

    /// Streams every result item as raw JSON.
    ///
    /// Same pagination behavior as [`Client::search_all`] without the
    /// typed decode step.
    pub fn search_all_raw<'a>(
        &'a self,
        request: &SearchRequest,
        max_records: Option<usize>,
    ) -> impl Stream<Item = Result<Value, ApiError>> + 'a {
        page_stream::<Value, _>(self, request.clone(), max_records)
    }

    async fn fetch_search_page<T>(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let params = self.search_params(request, cursor);
        debug!(
            url = %self.search_url,
            rows = request.rows(),
            "requesting search page"
        );

        let response = self
            .http
            .get(&self.search_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "search request failed");
            return Err(ApiError::from_status(status.as_u16()));
        }

        let mut page = response
            .json::<SearchPage<T>>()
            .await
            .map_err(decode_or_transport)?;
        // Echo the query as built; the match-all substitution stays a wire
        // detail.
        page.query = Some(request.query().to_string());

        debug!(
            items = page.items.len(),
            total = page.total_results,
            next_cursor = ?page.next_cursor,
            "search page received"
        );
        Ok(page)
    }

    /// Assembles the wire parameters for one search page request.
    fn search_params(&self, request: &SearchRequest, cursor: &str) -> Vec<(String, String)> {
        let query = if request.query().is_empty() {
            MATCH_ALL_QUERY
        } else {
            request.query()
        };

        let mut params: Vec<(String, String)> = vec![
            ("query".to_string(), query.to_string()),
            (
                "rows".to_string(),
                request.rows().min(MAX_ROWS).to_string(),
            ),
            ("cursor".to_string(), cursor.to_string()),
            ("wskey".to_string(), self.api_key.clone()),
            ("profile".to_string(), request.profile().as_str().to_string()),
        ];

        if !request.facets().is_empty() {
            let joined = request
                .facets()
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("facet".to_string(), joined));
        }

        if let Some(geo) = request.geographic() {
            params.push((
                "qf".to_string(),
                format!(
                    "distance(coverageLocation,{},{},{})",
                    geo.lat, geo.lon, geo.radius_km
                ),
            ));
        }

        if let Some(reusability) = request.reusability() {
            params.push(("reusability".to_string(), reusability.as_str().to_string()));
        }

        if let Some(media) = request.media() {
            params.push(("media".to_string(), media.to_string()));
        }

        if let Some(thumbnail) = request.thumbnail() {
            params.push(("thumbnail".to_string(), thumbnail.to_string()));
        }

        params
    }

    // ==================== Entity API ====================

    /// Retrieves a place entity by full URI (`http://data.europeana.eu/place/92`)
    /// or bare path (`place/92`).
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidUri`] when the input is neither a data
    /// URI nor a path, and [`EntityError::Api`] when the request fails.
    #[instrument(skip(self), fields(uri = %entity_uri))]
    pub async fn place_entity(&self, entity_uri: &str) -> Result<PlaceEntity, EntityError> {
        let path = entity::entity_path(entity_uri)?;
        let url = format!("{}/{path}", self.entity_url);
        debug!(url = %url, "requesting place entity");

        let response = self
            .http
            .get(&url)
            .query(&[("wskey", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "entity request failed");
            return Err(ApiError::from_status(status.as_u16()).into());
        }

        let place = response
            .json::<PlaceEntity>()
            .await
            .map_err(decode_or_transport)?;
        Ok(place)
    }

    /// Resolves every place URI in `values`, partitioning the outcome.
    ///
    /// Strings that do not look like place URIs are skipped rather than
    /// treated as failures; see [`PlaceLookup`].
    pub async fn place_entities<I, S>(&self, values: I) -> PlaceLookup
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lookup = PlaceLookup::default();
        for value in values {
            let value = value.into();
            if !entity::is_place_uri(&value) {
                lookup.skipped.push(value);
                continue;
            }
            match self.place_entity(&value).await {
                Ok(place) => lookup.entities.push(place),
                Err(error) => {
                    warn!(uri = %value, error = %error, "place entity lookup failed");
                    lookup.failed.push((value, error));
                }
            }
        }
        lookup
    }
}

#[async_trait]
impl FetchPage<Record> for Client {
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<Record>, ApiError> {
        self.fetch_search_page(request, cursor).await
    }
}

#[async_trait]
impl FetchPage<Value> for Client {
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        cursor: &str,
    ) -> Result<SearchPage<Value>, ApiError> {
        self.fetch_search_page(request, cursor).await
    }
}

// ==================== Tests ====================
