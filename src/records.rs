//! Typed models for Search API result records.
//!
//! # Overview
//! [`Record`] maps one raw search item into typed fields following the
//! Europeana Data Model. Mapping is total: every declared field is
//! independently optional, and a field whose value does not match its
//! declared shape decodes as absent instead of failing the record.
//! Upstream metadata mixes single values and lists freely, which
//! [`OneOrMany`] absorbs; keys the model does not declare are preserved
//! in [`Record::extra`].

use std::collections::{BTreeSet, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Multilingual field: language code to one or more values.
pub type LangMap = HashMap<String, OneOrMany<String>>;

/// One value or a list of values.
///
/// Most metadata fields are emitted in both shapes depending on the
/// source record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// First value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    /// True when the list shape is present but empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(values) => values.is_empty(),
        }
    }

    /// Iterates over the values regardless of shape.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }
}

/// Decodes a field tolerantly: a value that does not match the declared
/// type becomes `None` rather than failing the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// List variant of [`lenient`]: mismatches decode as an empty list.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Vec::<T>::deserialize(value).unwrap_or_default())
}

/// A digital representation attached to an item (image, video, document).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebResource {
    #[serde(default, deserialize_with = "lenient")]
    pub web_resource_edm_rights: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub web_resource_dc_rights: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub web_resource_dc_format: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub about: Option<String>,
}

/// Groups a cultural heritage object with its digital representations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Direct link to the digital object
    #[serde(default, deserialize_with = "lenient")]
    pub edm_is_shown_by: Option<String>,
    /// Provider page about the object
    #[serde(default, deserialize_with = "lenient")]
    pub edm_is_shown_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_object: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub web_resources: Vec<WebResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_rights: Option<String>,
}

/// A single search result record.
///
/// Field names follow the API's camelCase keys except the four
/// timestamp fields, which the API serves in snake_case.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    // Core identification
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub item_type: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub guid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,

    // Basic descriptive metadata
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_creator: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_contributor: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_subject: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_description: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<OneOrMany<String>>,

    // Geographic
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub place: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dcterms_spatial: Option<OneOrMany<String>>,

    // Providers
    #[serde(default, deserialize_with = "lenient")]
    pub data_provider: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_data_provider: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: Option<OneOrMany<String>>,

    // Media and access URLs
    #[serde(default, deserialize_with = "lenient")]
    pub edm_preview: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_is_shown_by: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_is_shown_at: Option<OneOrMany<String>>,

    // Rights
    #[serde(default, deserialize_with = "lenient")]
    pub rights: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_rights: Option<OneOrMany<String>>,

    // Language and format
    #[serde(default, deserialize_with = "lenient")]
    pub dc_language: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_format: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_current_location: Option<OneOrMany<String>>,

    // Language-aware metadata
    #[serde(default, deserialize_with = "lenient")]
    pub dc_creator_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_contributor_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_description_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_language_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_subject_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_title_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub dc_type_lang_aware: Option<LangMap>,

    // EDM concepts
    #[serde(default, deserialize_with = "lenient")]
    pub edm_concept: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_concept_label: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_concept_pref_label_lang_aware: Option<LangMap>,

    // EDM agents
    #[serde(default, deserialize_with = "lenient")]
    pub edm_agent: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_agent_label: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_agent_label_lang_aware: Option<LangMap>,

    // EDM places
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_label: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_alt_label: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_label_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_alt_label_lang_aware: Option<LangMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_latitude: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_place_longitude: Option<OneOrMany<String>>,

    // EDM timespans
    #[serde(default, deserialize_with = "lenient")]
    pub edm_timespan: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_timespan_label: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub edm_timespan_label_lang_aware: Option<LangMap>,

    // Collections and datasets
    #[serde(default, deserialize_with = "lenient")]
    pub edm_dataset_name: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub europeana_collection_name: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub organizations: Option<OneOrMany<String>>,

    // Quality metrics
    #[serde(default, deserialize_with = "lenient")]
    pub completeness: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub europeana_completeness: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<i64>,

    // Timestamps; the API serves these keys in snake_case
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<i64>,
    #[serde(rename = "timestamp_created", default, deserialize_with = "lenient")]
    pub timestamp_created: Option<String>,
    #[serde(rename = "timestamp_created_epoch", default, deserialize_with = "lenient")]
    pub timestamp_created_epoch: Option<i64>,
    #[serde(rename = "timestamp_update", default, deserialize_with = "lenient")]
    pub timestamp_update: Option<String>,
    #[serde(rename = "timestamp_update_epoch", default, deserialize_with = "lenient")]
    pub timestamp_update_epoch: Option<i64>,

    // Flags
    #[serde(default, deserialize_with = "lenient")]
    pub ugc: Option<OneOrMany<bool>>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_no_distribute: Option<bool>,

    // Nested structures
    #[serde(default, deserialize_with = "lenient_list")]
    pub aggregations: Vec<Aggregation>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub web_resources: Vec<WebResource>,

    /// Keys the model does not declare, kept verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Record {
    /// First title, whichever shape the metadata used.
    #[must_use]
    pub fn first_title(&self) -> Option<&str> {
        self.title.as_ref().and_then(OneOrMany::first).map(String::as_str)
    }

    /// First creator.
    #[must_use]
    pub fn first_creator(&self) -> Option<&str> {
        self.dc_creator
            .as_ref()
            .and_then(OneOrMany::first)
            .map(String::as_str)
    }

    /// First country.
    #[must_use]
    pub fn first_country(&self) -> Option<&str> {
        self.country
            .as_ref()
            .and_then(OneOrMany::first)
            .map(String::as_str)
    }

    /// First year.
    #[must_use]
    pub fn first_year(&self) -> Option<&str> {
        self.year.as_ref().and_then(OneOrMany::first).map(String::as_str)
    }

    /// Coordinates from the EDM place fields, when both parse.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.edm_place_latitude.as_ref()?.first()?.parse().ok()?;
        let lon = self.edm_place_longitude.as_ref()?.first()?.parse().ok()?;
        Some((lat, lon))
    }

    /// Record creation time as an epoch timestamp.
    #[must_use]
    pub fn creation_epoch(&self) -> Option<i64> {
        self.timestamp_created_epoch
    }

    /// Last update time as an epoch timestamp.
    #[must_use]
    pub fn update_epoch(&self) -> Option<i64> {
        self.timestamp_update_epoch
    }

    /// All distinct rights URIs across the record's rights fields and web
    /// resources, sorted.
    #[must_use]
    pub fn rights_uris(&self) -> Vec<String> {
        let mut uris = BTreeSet::new();

        for source in [&self.rights, &self.edm_rights] {
            if let Some(values) = source {
                for value in values.iter() {
                    if value.starts_with("http") {
                        uris.insert(value.clone());
                    }
                }
            }
        }

        for resource in &self.web_resources {
            if let Some(rights) = &resource.web_resource_edm_rights
                && rights.starts_with("http")
            {
                uris.insert(rights.clone());
            }
        }

        uris.into_iter().collect()
    }
}
