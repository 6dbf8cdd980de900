//! Field vocabulary for the Europeana Search API.
//!
//! # Overview
//! Closed enumerations for every queryable field, plus the profile,
//! media-type and reusability parameter values and the rights-URI
//! constants used by rights filters. Each enum exposes `as_str()`
//! returning the exact wire name the API expects.

use std::fmt;

/// Aggregated search fields that search across multiple metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateField {
    /// All title fields
    Title,
    /// All subject fields
    Subject,
    /// Creator/contributor names
    Who,
    /// Subject/topic/type
    What,
    /// Dates/time periods
    When,
    /// Geographic locations
    Where,
    /// Free text search
    Text,
}

impl AggregateField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subject => "subject",
            Self::Who => "who",
            Self::What => "what",
            Self::When => "when",
            Self::Where => "where",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for AggregateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All detailed search fields the API accepts.
///
/// Wire names are inconsistent upstream (snake_case, camelCase and
/// UPPERCASE all occur); `as_str()` is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    // Basic Europeana fields
    EuropeanaId,
    Timestamp,
    TimestampCreated,
    TimestampUpdate,
    EuropeanaCompleteness,
    Completeness,

    // Dublin Core proxy fields
    ProxyDcCreatorWildcard,
    ProxyDcContributor,
    Contributor,
    ProxyDcCoverage,
    ProxyDcCreator,
    ProxyDcDate,
    ProxyDcDescription,
    ProxyDcFormat,
    ProxyDcIdentifier,
    Language,
    ProxyDcPublisher,
    ProxyDcRights,
    ProxyDcSource,
    ProxyDcSubject,
    ProxyDcTitle,
    ProxyDcType,
    ProxyDcTypeSearch,

    // Dublin Core Terms proxy fields
    ProxyDctermsAlternative,
    ProxyDctermsCreated,
    ProxyDctermsHasPart,
    ProxyDctermsIsPartOf,
    ProxyDctermsIssued,
    ProxyDctermsMedium,
    ProxyDctermsProvenance,
    ProxyDctermsSpatial,
    ProxyDctermsTemporal,

    // EDM proxy fields
    ProxyEdmCurrentLocation,
    ProxyEdmHasMet,
    ProxyEdmIsRelatedTo,

    // Filter fields
    Type,
    Year,
    DataProvider,
    ProviderAggregationEdmHasView,
    ProviderAggregationEdmIntermediateProvider,
    ProviderAggregationEdmIsShownAt,
    ProviderAggregationEdmIsShownBy,
    ProviderAggregationEdmObject,
    Provider,
    ProviderAggregationDcRights,
    Rights,
    Ugc,
    EdmPreviewNoDistribute,
    EuropeanaCollectionName,
    EdmDatasetName,
    Country,
    EuropeanaAggregationEdmLanguage,

    // Web resource fields
    EdmWebResource,
    WrDcRights,
    WrDctermsIsReferencedBy,
    WrEdmIsNextInSequence,
    WrEdmRights,
    WrSvcsHasService,
    WrCcLicense,
    ProviderAggregationCcLicense,
    ProviderAggregationOdrlInheritedFrom,
    WrCcOdrlInheritedFrom,
    WrCcDeprecatedOn,
    ProviderAggregationCcDeprecatedOn,

    // Service fields
    SvcsService,
    SvDctermsConformsTo,

    // Agent fields
    EdmAgent,
    AgSkosPrefLabel,
    AgSkosAltLabel,
    AgFoafName,
    AgRdagr2DateOfBirth,
    AgRdagr2DateOfDeath,
    AgRdagr2PlaceOfBirth,
    AgRdagr2PlaceOfDeath,
    AgRdagr2ProfessionOrOccupation,

    // Concept fields
    SkosConcept,
    CcSkosPrefLabel,
    CcSkosAltLabel,

    // Place fields
    EdmPlace,
    PlWgs84PosLat,
    PlWgs84PosLong,
    PlWgs84PosAlt,
    PlSkosPrefLabel,
    PlSkosAltLabel,

    // Timespan fields
    EdmTimespan,
    TsSkosPrefLabel,
    TsSkosAltLabel,
}

impl SearchField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EuropeanaId => "europeana_id",
            Self::Timestamp => "timestamp",
            Self::TimestampCreated => "timestamp_created",
            Self::TimestampUpdate => "timestamp_update",
            Self::EuropeanaCompleteness => "europeana_completeness",
            Self::Completeness => "COMPLETENESS",
            Self::ProxyDcCreatorWildcard => "proxy_dc_creator.*",
            Self::ProxyDcContributor => "proxy_dc_contributor",
            Self::Contributor => "CONTRIBUTOR",
            Self::ProxyDcCoverage => "proxy_dc_coverage",
            Self::ProxyDcCreator => "proxy_dc_creator",
            Self::ProxyDcDate => "proxy_dc_date",
            Self::ProxyDcDescription => "proxy_dc_description",
            Self::ProxyDcFormat => "proxy_dc_format",
            Self::ProxyDcIdentifier => "proxy_dc_identifier",
            Self::Language => "LANGUAGE",
            Self::ProxyDcPublisher => "proxy_dc_publisher",
            Self::ProxyDcRights => "proxy_dc_rights",
            Self::ProxyDcSource => "proxy_dc_source",
            Self::ProxyDcSubject => "proxy_dc_subject",
            Self::ProxyDcTitle => "proxy_dc_title",
            Self::ProxyDcType => "proxy_dc_type",
            Self::ProxyDcTypeSearch => "proxy_dc_type_search",
            Self::ProxyDctermsAlternative => "proxy_dcterms_alternative",
            Self::ProxyDctermsCreated => "proxy_dcterms_created",
            Self::ProxyDctermsHasPart => "proxy_dcterms_hasPart",
            Self::ProxyDctermsIsPartOf => "proxy_dcterms_isPartOf",
            Self::ProxyDctermsIssued => "proxy_dcterms_issued",
            Self::ProxyDctermsMedium => "proxy_dcterms_medium",
            Self::ProxyDctermsProvenance => "proxy_dcterms_provenance",
            Self::ProxyDctermsSpatial => "proxy_dcterms_spatial",
            Self::ProxyDctermsTemporal => "proxy_dcterms_temporal",
            Self::ProxyEdmCurrentLocation => "proxy_edm_currentLocation",
            Self::ProxyEdmHasMet => "proxy_edm_hasMet",
            Self::ProxyEdmIsRelatedTo => "proxy_edm_isRelatedTo",
            Self::Type => "TYPE",
            Self::Year => "YEAR",
            Self::DataProvider => "DATA_PROVIDER",
            Self::ProviderAggregationEdmHasView => "provider_aggregation_edm_hasView",
            Self::ProviderAggregationEdmIntermediateProvider => {
                "provider_aggregation_edm_intermediateProvider"
            }
            Self::ProviderAggregationEdmIsShownAt => "provider_aggregation_edm_isShownAt",
            Self::ProviderAggregationEdmIsShownBy => "provider_aggregation_edm_isShownBy",
            Self::ProviderAggregationEdmObject => "provider_aggregation_edm_object",
            Self::Provider => "PROVIDER",
            Self::ProviderAggregationDcRights => "provider_aggregation_dc_rights",
            Self::Rights => "RIGHTS",
            Self::Ugc => "UGC",
            Self::EdmPreviewNoDistribute => "edm_previewNoDistribute",
            Self::EuropeanaCollectionName => "europeana_collectionName1",
            Self::EdmDatasetName => "edm_datasetName",
            Self::Country => "COUNTRY",
            Self::EuropeanaAggregationEdmLanguage => "europeana_aggregation_edm_language",
            Self::EdmWebResource => "edm_webResource",
            Self::WrDcRights => "wr_dc_rights",
            Self::WrDctermsIsReferencedBy => "wr_dcterms_isReferencedBy",
            Self::WrEdmIsNextInSequence => "wr_edm_isNextInSequence",
            Self::WrEdmRights => "wr_edm_rights",
            Self::WrSvcsHasService => "wr_svcs_hasservice",
            Self::WrCcLicense => "wr_cc_license",
            Self::ProviderAggregationCcLicense => "provider_aggregation_cc_license",
            Self::ProviderAggregationOdrlInheritedFrom => "provider_aggregation_odrl_inherited_from",
            Self::WrCcOdrlInheritedFrom => "wr_cc_odrl_inherited_from",
            Self::WrCcDeprecatedOn => "wr_cc_deprecated_on",
            Self::ProviderAggregationCcDeprecatedOn => "provider_aggregation_cc_deprecated_on",
            Self::SvcsService => "svcs_service",
            Self::SvDctermsConformsTo => "sv_dcterms_conformsTo",
            Self::EdmAgent => "edm_agent",
            Self::AgSkosPrefLabel => "ag_skos_prefLabel",
            Self::AgSkosAltLabel => "ag_skos_altLabel",
            Self::AgFoafName => "ag_foaf_name",
            Self::AgRdagr2DateOfBirth => "ag_rdagr2_dateOfBirth",
            Self::AgRdagr2DateOfDeath => "ag_rdagr2_dateOfDeath",
            Self::AgRdagr2PlaceOfBirth => "ag_rdagr2_placeOfBirth",
            Self::AgRdagr2PlaceOfDeath => "ag_rdagr2_placeOfDeath",
            Self::AgRdagr2ProfessionOrOccupation => "ag_rdagr2_professionOrOccupation",
            Self::SkosConcept => "skos_concept",
            Self::CcSkosPrefLabel => "cc_skos_prefLabel",
            Self::CcSkosAltLabel => "cc_skos_altLabel",
            Self::EdmPlace => "edm_place",
            Self::PlWgs84PosLat => "pl_wgs84_pos_lat",
            Self::PlWgs84PosLong => "pl_wgs84_pos_long",
            Self::PlWgs84PosAlt => "pl_wgs84_pos_alt",
            Self::PlSkosPrefLabel => "pl_skos_prefLabel",
            Self::PlSkosAltLabel => "pl_skos_altLabel",
            Self::EdmTimespan => "edm_timespan",
            Self::TsSkosPrefLabel => "ts_skos_prefLabel",
            Self::TsSkosAltLabel => "ts_skos_altLabel",
        }
    }

    /// Returns true if this field may be used as a facet.
    #[must_use]
    pub fn is_facetable(self) -> bool {
        FACETABLE_FIELDS.contains(&self)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields the API accepts in the `facet` parameter.
pub const FACETABLE_FIELDS: [SearchField; 13] = [
    SearchField::ProxyDcCreator,
    SearchField::ProxyDcContributor,
    SearchField::ProxyDcSubject,
    SearchField::ProxyDcType,
    SearchField::ProxyDcRights,
    SearchField::ProxyDctermsMedium,
    SearchField::ProxyDctermsSpatial,
    SearchField::Type,
    SearchField::Provider,
    SearchField::DataProvider,
    SearchField::Rights,
    SearchField::Country,
    SearchField::Language,
];

/// Key of a single query filter term.
///
/// Filters address either an aggregate field, a detailed search field, or
/// a caller-supplied field name the vocabulary does not model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryField {
    Aggregate(AggregateField),
    Search(SearchField),
    Custom(String),
}

impl QueryField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aggregate(field) => field.as_str(),
            Self::Search(field) => field.as_str(),
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AggregateField> for QueryField {
    fn from(field: AggregateField) -> Self {
        Self::Aggregate(field)
    }
}

impl From<SearchField> for QueryField {
    fn from(field: SearchField) -> Self {
        Self::Search(field)
    }
}

impl From<&str> for QueryField {
    fn from(name: &str) -> Self {
        Self::Custom(name.to_string())
    }
}

impl From<String> for QueryField {
    fn from(name: String) -> Self {
        Self::Custom(name)
    }
}

/// Media types accepted by the `TYPE` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Sound,
    Video,
    Text,
    ThreeD,
}

impl MediaType {
    /// Wire value of the media type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Sound => "SOUND",
            Self::Video => "VIDEO",
            Self::Text => "TEXT",
            Self::ThreeD => "3D",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response detail levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Basic metadata only
    Minimal,
    /// Standard metadata
    Standard,
    /// Full metadata including all available fields
    Rich,
    /// Include facet counts in the response
    Facets,
}

impl Profile {
    /// Wire value of the profile.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Standard => "standard",
            Self::Rich => "rich",
            Self::Facets => "facets",
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::Rich
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content reusability categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reusability {
    /// Freely reusable content
    Open,
    /// Content with some restrictions
    Restricted,
    /// Requires explicit permission
    Permission,
}

impl Reusability {
    /// Wire value of the reusability level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Restricted => "restricted",
            Self::Permission => "permission",
        }
    }
}

impl fmt::Display for Reusability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common rights patterns and URIs for rights filters.
pub mod rights {
    // Patterns for wildcard searches
    pub const PUBLIC_DOMAIN: &str = "*public*";
    pub const CREATIVE_COMMONS: &str = "*creative*";
    pub const COPYRIGHT: &str = "*copyright*";

    // Public Domain URIs
    pub const PDM_URI: &str = "http://creativecommons.org/publicdomain/mark/1.0/";
    pub const CC0_URI: &str = "http://creativecommons.org/publicdomain/zero/1.0/";

    // Creative Commons license URIs (version agnostic patterns)
    pub const CC_BY: &str = "http://creativecommons.org/licenses/by/*";
    pub const CC_BY_SA: &str = "http://creativecommons.org/licenses/by-sa/*";
    pub const CC_BY_ND: &str = "http://creativecommons.org/licenses/by-nd/*";
    pub const CC_BY_NC: &str = "http://creativecommons.org/licenses/by-nc/*";
    pub const CC_BY_NC_SA: &str = "http://creativecommons.org/licenses/by-nc-sa/*";
    pub const CC_BY_NC_ND: &str = "http://creativecommons.org/licenses/by-nc-nd/*";

    // Rights Statements URIs
    pub const IN_COPYRIGHT: &str = "http://rightsstatements.org/vocab/InC/1.0/";
    pub const IN_COPYRIGHT_EU_ORPHAN: &str = "http://rightsstatements.org/vocab/InC-OW-EU/1.0/";
    pub const IN_COPYRIGHT_EDUCATIONAL: &str = "http://rightsstatements.org/vocab/InC-EDU/1.0/";
    pub const IN_COPYRIGHT_NON_COMMERCIAL: &str = "http://rightsstatements.org/vocab/InC-NC/1.0/";
    pub const NO_COPYRIGHT_CONTRACTUAL: &str = "http://rightsstatements.org/vocab/NoC-CR/1.0/";
    pub const NO_COPYRIGHT_OTHER: &str = "http://rightsstatements.org/vocab/NoC-OKLR/1.0/";
    pub const NO_KNOWN_COPYRIGHT: &str = "http://rightsstatements.org/vocab/NKC/1.0/";
    pub const COPYRIGHT_NOT_EVALUATED: &str = "http://rightsstatements.org/vocab/CNE/1.0/";
    pub const COPYRIGHT_UNDETERMINED: &str = "http://rightsstatements.org/vocab/UND/1.0/";
}
