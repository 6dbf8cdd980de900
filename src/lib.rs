//! Europeana API Client Library
//!
//! This library provides a typed client for the Europeana cultural-heritage
//! APIs: fluent query construction, cursor-based search pagination, tolerant
//! record decoding, and place entity lookup.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fields`] - Field vocabulary, enums, and reuse-rights constants
//! - [`query`] - Query builder and immutable search requests
//! - [`records`] - Tolerant record and resource decoding
//! - [`search`] - Page types and the cursor pagination engine
//! - [`client`] - HTTP access to the Search and Entity APIs
//! - [`entity`] - Place entity documents and URI handling

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod entity;
pub mod fields;
pub mod query;
pub mod records;
pub mod search;

mod user_agent;

// Re-export commonly used types
pub use client::{
    ApiError, Client, DEFAULT_ENTITY_URL, DEFAULT_SEARCH_URL, MATCH_ALL_QUERY,
};
pub use entity::{EntityAggregation, EntityError, EntityResource, PlaceEntity, PlaceLookup};
pub use fields::{
    AggregateField, FACETABLE_FIELDS, MediaType, Profile, QueryField, Reusability, SearchField,
};
pub use query::{
    DEFAULT_ROWS, GeoConstraint, MAX_ROWS, QueryBuilder, QueryError, SearchRequest,
    build_query_string, range,
};
pub use records::{Aggregation, LangMap, OneOrMany, Record, WebResource};
pub use search::{
    CURSOR_START, Facet, FacetField, FetchPage, MAX_CONSECUTIVE_EMPTY_PAGES, SearchPage,
    page_stream,
};
