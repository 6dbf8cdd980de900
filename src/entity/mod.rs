//! Place entity types and URI handling for the Entity API.
//!
//! # Overview
//!
//! Search records reference named places by data URI
//! (`http://data.europeana.eu/place/92`). This module turns those
//! references into Entity API paths, recognizes which strings are place
//! references at all, and decodes the entity documents the API returns.
//!
//! # Example
//!
//! ```
//! use europeana::entity;
//!
//! let path = entity::entity_path("http://data.europeana.eu/place/92")?;
//! assert_eq!(path, "place/92");
//! assert!(entity::is_place_uri("place/92"));
//! assert!(!entity::is_place_uri("Paris"));
//! # Ok::<(), europeana::EntityError>(())
//! ```

mod error;

pub use error::EntityError;

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::records::{LangMap, OneOrMany, lenient, lenient_list};

/// Prefix shared by all place data URIs.
const PLACE_URI_PREFIX: &str = "http://data.europeana.eu/place/";

/// Full data URIs: scheme and host are fixed, the capture is the entity path.
#[allow(clippy::expect_used)]
static DATA_URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^http://data\.europeana\.eu/(.+)$").expect("data URI regex is valid") // Static pattern, safe to panic
});

/// Extracts the Entity API path from a data URI or validates a bare path.
///
/// Accepts `http://data.europeana.eu/<kind>/<id>` (the path is extracted)
/// or a bare `<kind>/<id>` path (passed through unchanged).
///
/// # Errors
///
/// Returns [`EntityError::InvalidUri`] for anything else.
pub fn entity_path(entity_uri: &str) -> Result<&str, EntityError> {
    if entity_uri.starts_with("http://data.europeana.eu/") {
        return DATA_URI_PATTERN
            .captures(entity_uri)
            .and_then(|captures| captures.get(1))
            .map(|path| path.as_str())
            .ok_or_else(|| EntityError::invalid_uri(entity_uri));
    }

    if entity_uri.contains('/') {
        return Ok(entity_uri);
    }

    Err(EntityError::invalid_uri(entity_uri))
}

/// True when `value` is a place data URI or place path with a non-blank id.
#[must_use]
pub fn is_place_uri(value: &str) -> bool {
    let id = if let Some(rest) = value.strip_prefix(PLACE_URI_PREFIX) {
        rest
    } else if let Some(rest) = value.strip_prefix("place/") {
        rest
    } else {
        return false;
    };
    !id.trim().is_empty()
}

// ==================== Entity documents ====================

/// A visual resource attached to an entity (depiction, isShownBy).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityResource {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
}

/// Aggregation metadata for an entity (provenance, ranking, counts).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAggregation {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub aggregation_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub modified: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_rank: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub record_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub aggregates: Vec<String>,
}

/// A place entity: a physical location referenced by heritage records.
///
/// Carries geographic coordinates, multilingual labels, and relationships
/// to other entities. Every field is optional; the decoder tolerates any
/// well-formed JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceEntity {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub entity_type: Option<String>,
    /// JSON-LD context; a single URI or a list of them.
    #[serde(rename = "@context", default, deserialize_with = "lenient")]
    pub context: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub depiction: Option<EntityResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_shown_by: Option<EntityResource>,
    /// Preferred label per language.
    #[serde(default, deserialize_with = "lenient")]
    pub pref_label: Option<LangMap>,
    /// Alternative labels per language.
    #[serde(default, deserialize_with = "lenient")]
    pub alt_label: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub long: Option<f64>,
    /// Altitude in meters.
    #[serde(default, deserialize_with = "lenient")]
    pub alt: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub note: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub has_part: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub is_part_of: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub is_next_in_sequence: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub same_as: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub in_scheme: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_aggregated_by: Option<EntityAggregation>,
}

impl PlaceEntity {
    /// Preferred label in `language`, or `None` when the entity has no
    /// label for it.
    #[must_use]
    pub fn label(&self, language: &str) -> Option<&str> {
        self.pref_label
            .as_ref()
            .and_then(|labels| labels.get(language))
            .and_then(OneOrMany::first)
            .map(String::as_str)
    }

    /// Coordinate pair when both latitude and longitude are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some((lat, long)),
            _ => None,
        }
    }
}

/// Outcome of a batch place lookup, partitioned the way callers consume it.
#[derive(Debug, Default)]
pub struct PlaceLookup {
    /// Successfully resolved place entities.
    pub entities: Vec<PlaceEntity>,
    /// Inputs that looked like place URIs but failed to resolve.
    pub failed: Vec<(String, EntityError)>,
    /// Inputs that are not place references at all.
    pub skipped: Vec<String>,
}

// ==================== Tests ====================
