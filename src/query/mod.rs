//! Query construction for the Search API.
//!
//! # Overview
//! [`QueryBuilder`] is a fluent accumulator over filter terms, free text,
//! facets and request parameters. [`QueryBuilder::build`] compiles it into
//! an immutable [`SearchRequest`] snapshot; the builder can keep changing
//! afterwards without affecting requests already built.
//!
//! # Example
//! ```
//! use europeana::fields::MediaType;
//! use europeana::query::QueryBuilder;
//!
//! let request = QueryBuilder::new()
//!     .who("Vincent van Gogh")
//!     .media_type(MediaType::Image)
//!     .rows(50)
//!     .build();
//!
//! assert_eq!(request.query(), "who:\"Vincent van Gogh\" AND TYPE:IMAGE");
//! assert_eq!(request.rows(), 50);
//! ```

pub mod error;
mod string;

pub use error::QueryError;
pub use string::{build_query_string, range};

use crate::fields::{
    AggregateField, MediaType, Profile, QueryField, Reusability, SearchField, rights,
};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_ROWS: usize = 100;

/// Largest page size the API honours; larger requests are clamped.
pub const MAX_ROWS: usize = 100;

/// Geographic proximity constraint, one per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoConstraint {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

/// Generates one fluent setter per named filter field.
macro_rules! field_setters {
    ($($(#[$doc:meta])* $name:ident => $field:expr;)+) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: impl Into<String>) -> Self {
                self.set_filter($field, value);
                self
            }
        )+
    };
}

/// Fluent interface for building search queries.
///
/// Each filter field is logically unique: setting it again overwrites the
/// value while keeping the term's original position in the compiled query.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    text: Option<String>,
    filters: Vec<(QueryField, String)>,
    facets: Vec<SearchField>,
    geographic: Option<GeoConstraint>,
    profile: Profile,
    rows: usize,
    reusability: Option<Reusability>,
    media: Option<bool>,
    thumbnail: Option<bool>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            text: None,
            filters: Vec::new(),
            facets: Vec::new(),
            geographic: None,
            profile: Profile::default(),
            rows: DEFAULT_ROWS,
            reusability: None,
            media: None,
            thumbnail: None,
        }
    }
}

impl QueryBuilder {
    /// Creates an empty builder with default profile and page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a filter on any field, including ones the vocabulary does not
    /// model (pass a `&str` field name).
    #[must_use]
    pub fn filter(mut self, field: impl Into<QueryField>, value: impl Into<String>) -> Self {
        self.set_filter(field, value);
        self
    }

    fn set_filter(&mut self, field: impl Into<QueryField>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if let Some(slot) = self.filters.iter_mut().find(|(existing, _)| *existing == field) {
            slot.1 = value;
        } else {
            self.filters.push((field, value));
        }
    }

    // ==================== Aggregate field setters ====================

    field_setters! {
        /// Filter by creator/artist name.
        who => AggregateField::Who;
        /// Filter by geographic location.
        location => AggregateField::Where;
        /// Filter by subject/topic.
        what => AggregateField::What;
        /// Filter by title.
        title => AggregateField::Title;
        /// Filter by temporal description.
        when => AggregateField::When;
        /// Filter on the aggregated free-text field.
        text => AggregateField::Text;
    }

    // ==================== Semantic shortcuts ====================

    /// Filter by media type.
    #[must_use]
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.set_filter(SearchField::Type, media_type.as_str());
        self
    }

    /// Filter by a year range. Open bounds render as `*`; both bounds
    /// absent is a no-op.
    #[must_use]
    pub fn time_period(mut self, start_year: Option<i32>, end_year: Option<i32>) -> Self {
        if start_year.is_none() && end_year.is_none() {
            return self;
        }
        self.set_filter(SearchField::Year, string::range(start_year, end_year));
        self
    }

    /// Filter for public domain items only. Also narrows reusability to
    /// open content.
    #[must_use]
    pub fn public_domain(mut self) -> Self {
        self.set_filter(
            SearchField::Rights,
            format!("({} OR {})", rights::PDM_URI, rights::CC0_URI),
        );
        self.reusability = Some(Reusability::Open);
        self
    }

    /// Filter for Creative Commons licensed items. A known license code
    /// (`by`, `by-sa`, `by-nd`, `by-nc`, `by-nc-sa`, `by-nc-nd`) selects
    /// its URI pattern; anything else falls back to the CC wildcard.
    #[must_use]
    pub fn creative_commons(mut self, license_type: Option<&str>) -> Self {
        let rights_filter = match license_type.map(str::to_lowercase).as_deref() {
            Some("by") => rights::CC_BY,
            Some("by-sa") => rights::CC_BY_SA,
            Some("by-nd") => rights::CC_BY_ND,
            Some("by-nc") => rights::CC_BY_NC,
            Some("by-nc-sa") => rights::CC_BY_NC_SA,
            Some("by-nc-nd") => rights::CC_BY_NC_ND,
            _ => rights::CREATIVE_COMMONS,
        };
        self.set_filter(SearchField::Rights, rights_filter);
        self
    }

    /// Filter by contributing institution, either the data provider
    /// (default) or the aggregating provider.
    #[must_use]
    pub fn institution(mut self, name: impl Into<String>, as_provider: bool) -> Self {
        let field = if as_provider {
            SearchField::Provider
        } else {
            SearchField::DataProvider
        };
        self.set_filter(field, name);
        self
    }

    /// Filter by minimum metadata completeness score (0-10).
    #[must_use]
    pub fn quality(mut self, min_score: u8) -> Self {
        self.set_filter(
            SearchField::EuropeanaCompleteness,
            format!("[{min_score} TO 10]"),
        );
        self
    }

    /// Filter by user generated content flag.
    #[must_use]
    pub fn ugc(mut self, value: bool) -> Self {
        self.set_filter(SearchField::Ugc, value.to_string());
        self
    }

    /// Filter by the EDM preview-no-distribute flag.
    #[must_use]
    pub fn edm_preview_no_distribute(mut self, value: bool) -> Self {
        self.set_filter(SearchField::EdmPreviewNoDistribute, value.to_string());
        self
    }

    // ==================== Detailed field setters ====================

    field_setters! {
        /// Filter by Europeana ID of the record.
        europeana_id => SearchField::EuropeanaId;
        /// Filter by timestamp.
        timestamp => SearchField::Timestamp;
        /// Filter by record creation date (ISO 8601).
        timestamp_created => SearchField::TimestampCreated;
        /// Filter by record update date (ISO 8601).
        timestamp_update => SearchField::TimestampUpdate;
        /// Filter by exact metadata completeness score (1-10).
        completeness_score => SearchField::EuropeanaCompleteness;
        /// Filter by the completeness field.
        completeness => SearchField::Completeness;
        /// Filter by Dublin Core creator with wildcard support.
        dc_creator_wildcard => SearchField::ProxyDcCreatorWildcard;
        /// Filter by Dublin Core contributor.
        dc_contributor => SearchField::ProxyDcContributor;
        /// Filter by the contributor field.
        contributor => SearchField::Contributor;
        /// Filter by Dublin Core coverage.
        dc_coverage => SearchField::ProxyDcCoverage;
        /// Filter by Dublin Core creator.
        dc_creator => SearchField::ProxyDcCreator;
        /// Filter by Dublin Core date.
        dc_date => SearchField::ProxyDcDate;
        /// Filter by Dublin Core description.
        dc_description => SearchField::ProxyDcDescription;
        /// Filter by Dublin Core format.
        dc_format => SearchField::ProxyDcFormat;
        /// Filter by Dublin Core identifier.
        dc_identifier => SearchField::ProxyDcIdentifier;
        /// Filter by language.
        language => SearchField::Language;
        /// Filter by Dublin Core publisher.
        dc_publisher => SearchField::ProxyDcPublisher;
        /// Filter by Dublin Core rights.
        dc_rights => SearchField::ProxyDcRights;
        /// Filter by Dublin Core source.
        dc_source => SearchField::ProxyDcSource;
        /// Filter by Dublin Core subject.
        dc_subject => SearchField::ProxyDcSubject;
        /// Filter by Dublin Core title.
        dc_title => SearchField::ProxyDcTitle;
        /// Filter by Dublin Core type.
        dc_type => SearchField::ProxyDcType;
        /// Filter by the Dublin Core type search field.
        dc_type_search => SearchField::ProxyDcTypeSearch;
        /// Filter by Dublin Core Terms alternative title.
        dcterms_alternative => SearchField::ProxyDctermsAlternative;
        /// Filter by Dublin Core Terms created date.
        dcterms_created => SearchField::ProxyDctermsCreated;
        /// Filter by Dublin Core Terms hasPart relation.
        dcterms_has_part => SearchField::ProxyDctermsHasPart;
        /// Filter by Dublin Core Terms isPartOf relation.
        dcterms_is_part_of => SearchField::ProxyDctermsIsPartOf;
        /// Filter by Dublin Core Terms issued date.
        dcterms_issued => SearchField::ProxyDctermsIssued;
        /// Filter by Dublin Core Terms medium.
        dcterms_medium => SearchField::ProxyDctermsMedium;
        /// Filter by Dublin Core Terms provenance.
        dcterms_provenance => SearchField::ProxyDctermsProvenance;
        /// Filter by Dublin Core Terms spatial coverage.
        dcterms_spatial => SearchField::ProxyDctermsSpatial;
        /// Filter by Dublin Core Terms temporal coverage.
        dcterms_temporal => SearchField::ProxyDctermsTemporal;
        /// Filter by EDM current location.
        edm_current_location => SearchField::ProxyEdmCurrentLocation;
        /// Filter by EDM hasMet relation.
        edm_has_met => SearchField::ProxyEdmHasMet;
        /// Filter by EDM isRelatedTo relation.
        edm_is_related_to => SearchField::ProxyEdmIsRelatedTo;
        /// Filter by media type via the raw TYPE field.
        type_filter => SearchField::Type;
        /// Filter by year.
        year_filter => SearchField::Year;
        /// Filter by data provider.
        data_provider => SearchField::DataProvider;
        /// Filter by provider aggregation EDM hasView.
        provider_edm_has_view => SearchField::ProviderAggregationEdmHasView;
        /// Filter by provider aggregation EDM intermediate provider.
        provider_edm_intermediate_provider => SearchField::ProviderAggregationEdmIntermediateProvider;
        /// Filter by provider aggregation EDM isShownAt.
        provider_edm_is_shown_at => SearchField::ProviderAggregationEdmIsShownAt;
        /// Filter by provider aggregation EDM isShownBy.
        provider_edm_is_shown_by => SearchField::ProviderAggregationEdmIsShownBy;
        /// Filter by provider aggregation EDM object.
        provider_edm_object => SearchField::ProviderAggregationEdmObject;
        /// Filter by provider.
        provider => SearchField::Provider;
        /// Filter by provider aggregation DC rights.
        provider_dc_rights => SearchField::ProviderAggregationDcRights;
        /// Filter by rights statement.
        rights => SearchField::Rights;
        /// Filter by Europeana collection name.
        collection_name => SearchField::EuropeanaCollectionName;
        /// Filter by EDM dataset name.
        dataset_name => SearchField::EdmDatasetName;
        /// Filter by country.
        country => SearchField::Country;
        /// Filter by Europeana aggregation EDM language.
        aggregation_language => SearchField::EuropeanaAggregationEdmLanguage;
        /// Filter by EDM web resource.
        web_resource => SearchField::EdmWebResource;
        /// Filter by web resource DC rights.
        web_resource_rights => SearchField::WrDcRights;
        /// Filter by web resource DCTERMS isReferencedBy.
        web_resource_is_referenced_by => SearchField::WrDctermsIsReferencedBy;
        /// Filter by web resource EDM isNextInSequence.
        web_resource_next_in_sequence => SearchField::WrEdmIsNextInSequence;
        /// Filter by web resource EDM rights.
        web_resource_edm_rights => SearchField::WrEdmRights;
        /// Filter by web resource SVCS hasService.
        web_resource_has_service => SearchField::WrSvcsHasService;
        /// Filter by web resource CC license.
        web_resource_cc_license => SearchField::WrCcLicense;
        /// Filter by provider aggregation CC license.
        provider_cc_license => SearchField::ProviderAggregationCcLicense;
        /// Filter by provider aggregation ODRL inherited from.
        provider_odrl_inherited_from => SearchField::ProviderAggregationOdrlInheritedFrom;
        /// Filter by web resource CC ODRL inherited from.
        web_resource_odrl_inherited_from => SearchField::WrCcOdrlInheritedFrom;
        /// Filter by web resource CC deprecated-on date.
        web_resource_cc_deprecated_on => SearchField::WrCcDeprecatedOn;
        /// Filter by provider aggregation CC deprecated-on date.
        provider_cc_deprecated_on => SearchField::ProviderAggregationCcDeprecatedOn;
        /// Filter by SVCS service.
        service => SearchField::SvcsService;
        /// Filter by service DCTERMS conformsTo.
        service_conforms_to => SearchField::SvDctermsConformsTo;
        /// Filter by EDM agent.
        agent => SearchField::EdmAgent;
        /// Filter by agent SKOS preferred label.
        agent_pref_label => SearchField::AgSkosPrefLabel;
        /// Filter by agent SKOS alternative label.
        agent_alt_label => SearchField::AgSkosAltLabel;
        /// Filter by agent FOAF name.
        agent_name => SearchField::AgFoafName;
        /// Filter by agent date of birth.
        agent_birth_date => SearchField::AgRdagr2DateOfBirth;
        /// Filter by agent date of death.
        agent_death_date => SearchField::AgRdagr2DateOfDeath;
        /// Filter by agent place of birth.
        agent_birth_place => SearchField::AgRdagr2PlaceOfBirth;
        /// Filter by agent place of death.
        agent_death_place => SearchField::AgRdagr2PlaceOfDeath;
        /// Filter by agent profession or occupation.
        agent_profession => SearchField::AgRdagr2ProfessionOrOccupation;
        /// Filter by SKOS concept.
        concept => SearchField::SkosConcept;
        /// Filter by concept SKOS preferred label.
        concept_pref_label => SearchField::CcSkosPrefLabel;
        /// Filter by concept SKOS alternative label.
        concept_alt_label => SearchField::CcSkosAltLabel;
        /// Filter by EDM place.
        place => SearchField::EdmPlace;
        /// Filter by place WGS84 latitude.
        place_latitude => SearchField::PlWgs84PosLat;
        /// Filter by place WGS84 longitude.
        place_longitude => SearchField::PlWgs84PosLong;
        /// Filter by place WGS84 altitude.
        place_altitude => SearchField::PlWgs84PosAlt;
        /// Filter by place SKOS preferred label.
        place_pref_label => SearchField::PlSkosPrefLabel;
        /// Filter by place SKOS alternative label.
        place_alt_label => SearchField::PlSkosAltLabel;
        /// Filter by EDM timespan.
        timespan => SearchField::EdmTimespan;
        /// Filter by timespan SKOS preferred label.
        timespan_pref_label => SearchField::TsSkosPrefLabel;
        /// Filter by timespan SKOS alternative label.
        timespan_alt_label => SearchField::TsSkosAltLabel;
    }

    // ==================== Request parameters ====================

    /// Sets the free text search query. Rendered first in the compiled
    /// query, ahead of all filter terms.
    #[must_use]
    pub fn text_query(mut self, query: impl Into<String>) -> Self {
        self.text = Some(query.into());
        self
    }

    /// Sets a geographic proximity constraint. A query holds at most one;
    /// the last call wins.
    #[must_use]
    pub fn geographic(mut self, lat: f64, lon: f64, radius_km: f64) -> Self {
        self.geographic = Some(GeoConstraint {
            lat,
            lon,
            radius_km,
        });
        self
    }

    /// Adds one facet field.
    ///
    /// # Errors
    /// Returns [`QueryError::NotFacetable`] when the field is not in the
    /// facetable allow-list.
    pub fn facet(mut self, field: SearchField) -> Result<Self, QueryError> {
        if !field.is_facetable() {
            return Err(QueryError::not_facetable(field));
        }
        self.facets.push(field);
        Ok(self)
    }

    /// Adds several facet fields, validating each in turn.
    ///
    /// # Errors
    /// Returns [`QueryError::NotFacetable`] for the first field outside
    /// the allow-list; fields before it are kept.
    pub fn facets<I>(mut self, fields: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = SearchField>,
    {
        for field in fields {
            self = self.facet(field)?;
        }
        Ok(self)
    }

    /// Sets the response detail level.
    #[must_use]
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the number of results per page, silently clamped to
    /// [`MAX_ROWS`].
    #[must_use]
    pub fn rows(mut self, count: usize) -> Self {
        self.rows = count.min(MAX_ROWS);
        self
    }

    /// Sets the reusability filter.
    #[must_use]
    pub fn reusability(mut self, level: Reusability) -> Self {
        self.reusability = Some(level);
        self
    }

    /// Filter items with or without media.
    #[must_use]
    pub fn with_media(mut self, has_media: bool) -> Self {
        self.media = Some(has_media);
        self
    }

    /// Filter items with or without thumbnails.
    #[must_use]
    pub fn with_thumbnails(mut self, has_thumbnails: bool) -> Self {
        self.thumbnail = Some(has_thumbnails);
        self
    }

    /// Compiles the current filter state into a query string without
    /// building a full request.
    #[must_use]
    pub fn query_string(&self) -> String {
        build_query_string(self.text.as_deref(), &self.filters)
    }

    /// Compiles the builder into an immutable request snapshot.
    ///
    /// The builder stays usable; later changes never affect requests
    /// already built.
    #[must_use]
    pub fn build(&self) -> SearchRequest {
        SearchRequest {
            query: self.query_string(),
            rows: self.rows.min(MAX_ROWS),
            facets: self.facets.clone(),
            profile: self.profile,
            reusability: self.reusability,
            media: self.media,
            thumbnail: self.thumbnail,
            geographic: self.geographic,
        }
    }
}

/// Immutable description of one search request.
///
/// Produced by [`QueryBuilder::build`]; holds the compiled query string
/// and every auxiliary parameter the transport needs. Page size is the
/// only thing pagination varies, via [`SearchRequest::with_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    query: String,
    rows: usize,
    facets: Vec<SearchField>,
    profile: Profile,
    reusability: Option<Reusability>,
    media: Option<bool>,
    thumbnail: Option<bool>,
    geographic: Option<GeoConstraint>,
}

impl SearchRequest {
    /// Compiled query string; may be empty (transport substitutes the
    /// match-all query).
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Requested page size, always `<=` [`MAX_ROWS`].
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Facet fields to request, in registration order.
    #[must_use]
    pub fn facets(&self) -> &[SearchField] {
        &self.facets
    }

    /// Response detail level.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Reusability filter, when set.
    #[must_use]
    pub fn reusability(&self) -> Option<Reusability> {
        self.reusability
    }

    /// Media presence filter, when set.
    #[must_use]
    pub fn media(&self) -> Option<bool> {
        self.media
    }

    /// Thumbnail presence filter, when set.
    #[must_use]
    pub fn thumbnail(&self) -> Option<bool> {
        self.thumbnail
    }

    /// Geographic proximity constraint, when set.
    #[must_use]
    pub fn geographic(&self) -> Option<GeoConstraint> {
        self.geographic
    }

    /// Returns a copy of this request with a different page size, clamped
    /// to [`MAX_ROWS`]. Everything else is untouched.
    #[must_use]
    pub fn with_rows(&self, rows: usize) -> Self {
        Self {
            rows: rows.min(MAX_ROWS),
            ..self.clone()
        }
    }
}
