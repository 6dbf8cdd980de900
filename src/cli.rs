//! CLI argument definitions using clap derive macros.

use clap::Parser;

use europeana::{DEFAULT_ROWS, FACETABLE_FIELDS, MediaType, Reusability, SearchField};

/// Search Europeana cultural-heritage collections from the command line.
///
/// Streams matching records as one JSON object per line, following the
/// API's pagination cursor until the result set or the record budget is
/// exhausted.
#[derive(Parser, Debug)]
#[command(name = "europeana")]
#[command(author, version, about)]
pub struct Args {
    /// Free-text search terms (matches everything when omitted)
    pub query: Option<String>,

    /// API key; register at https://pro.europeana.eu/get-api
    #[arg(short = 'k', long, env = "EUROPEANA_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Field filter as FIELD=VALUE (repeatable, e.g. -f who=Rembrandt)
    #[arg(short = 'f', long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Restrict to a media type (IMAGE, VIDEO, SOUND, TEXT, 3D)
    #[arg(short = 'm', long, value_parser = parse_media_type)]
    pub media_type: Option<MediaType>,

    /// Restrict by reuse level (open, restricted, permission)
    #[arg(long, value_parser = parse_reusability)]
    pub reusability: Option<Reusability>,

    /// Page size per API request (1-100)
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=100))]
    pub rows: usize,

    /// Stop after this many records (default: fetch the whole result set)
    #[arg(short = 'n', long)]
    pub max_records: Option<usize>,

    /// Request facet counts for a field (repeatable)
    #[arg(long = "facet", value_name = "FIELD", value_parser = parse_facet_field)]
    pub facets: Vec<SearchField>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Splits a `FIELD=VALUE` filter argument at the first `=`.
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(format!("expected FIELD=VALUE, got '{raw}'"));
    };
    if field.is_empty() {
        return Err(format!("filter field name is empty in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

fn parse_media_type(raw: &str) -> Result<MediaType, String> {
    match raw.to_ascii_uppercase().as_str() {
        "IMAGE" => Ok(MediaType::Image),
        "VIDEO" => Ok(MediaType::Video),
        "SOUND" => Ok(MediaType::Sound),
        "TEXT" => Ok(MediaType::Text),
        "3D" => Ok(MediaType::ThreeD),
        _ => Err(format!(
            "unknown media type '{raw}' (expected IMAGE, VIDEO, SOUND, TEXT, or 3D)"
        )),
    }
}

fn parse_reusability(raw: &str) -> Result<Reusability, String> {
    match raw.to_ascii_lowercase().as_str() {
        "open" => Ok(Reusability::Open),
        "restricted" => Ok(Reusability::Restricted),
        "permission" => Ok(Reusability::Permission),
        _ => Err(format!(
            "unknown reusability '{raw}' (expected open, restricted, or permission)"
        )),
    }
}

/// Facets only make sense on facetable fields, so parsing doubles as
/// validation.
fn parse_facet_field(raw: &str) -> Result<SearchField, String> {
    FACETABLE_FIELDS
        .iter()
        .find(|field| field.as_str().eq_ignore_ascii_case(raw))
        .copied()
        .ok_or_else(|| {
            let allowed = FACETABLE_FIELDS
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("'{raw}' is not a facetable field (expected one of: {allowed})")
        })
}
