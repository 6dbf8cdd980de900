//! Lucene-style query string assembly.
//!
//! Pure string compilation: no validation, no escaping of embedded quotes
//! or boolean operators. Callers who need literal `AND`/`OR` inside a
//! value must pre-quote it themselves.

use std::borrow::Cow;
use std::fmt;

use crate::fields::QueryField;

/// Builds a boolean query string from free text and field filters.
///
/// Free text (when present and non-empty) comes first, unquoted. Filter
/// terms follow in the order given, rendered as `field:value`, joined
/// with ` AND `. Both inputs empty yields an empty string; substituting
/// the match-all query is the transport's job, not the compiler's.
#[must_use]
pub fn build_query_string(text: Option<&str>, filters: &[(QueryField, String)]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(filters.len() + 1);

    if let Some(text) = text
        && !text.is_empty()
    {
        parts.push(text.to_string());
    }

    for (field, value) in filters {
        parts.push(format!("{}:{}", field.as_str(), quote_value(value)));
    }

    parts.join(" AND ")
}

/// Builds a range expression with `*` as the open bound.
///
/// `range(Some(1800), Some(1900))` yields `[1800 TO 1900]`; a missing
/// bound becomes `*`.
#[must_use]
pub fn range<L: fmt::Display, H: fmt::Display>(low: Option<L>, high: Option<H>) -> String {
    match (low, high) {
        (Some(low), Some(high)) => format!("[{low} TO {high}]"),
        (Some(low), None) => format!("[{low} TO *]"),
        (None, Some(high)) => format!("[* TO {high}]"),
        (None, None) => "[* TO *]".to_string(),
    }
}

/// Wraps a value in double quotes when it contains a space and is not
/// already wrapped.
fn quote_value(value: &str) -> Cow<'_, str> {
    if value.contains(' ') && !(value.starts_with('"') && value.ends_with('"')) {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fields::{AggregateField, SearchField};

    fn filters(pairs: &[(QueryField, &str)]) -> Vec<(QueryField, String)> {
        pairs
            .iter()
            .map(|(field, value)| (field.clone(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_text_alone_passes_through() {
        assert_eq!(build_query_string(Some("windmill"), &[]), "windmill");
    }

    #[test]
    fn test_empty_inputs_yield_empty_string() {
        assert_eq!(build_query_string(None, &[]), "");
        assert_eq!(build_query_string(Some(""), &[]), "");
    }

    #[test]
    fn test_single_filter_renders_field_colon_value() {
        let filters = filters(&[(QueryField::from(AggregateField::Who), "Rembrandt")]);
        assert_eq!(build_query_string(None, &filters), "who:Rembrandt");
    }

    #[test]
    fn test_value_with_space_is_quoted() {
        let filters = filters(&[(QueryField::from(AggregateField::Who), "Vincent van Gogh")]);
        assert_eq!(
            build_query_string(None, &filters),
            "who:\"Vincent van Gogh\""
        );
    }

    #[test]
    fn test_already_quoted_value_is_not_double_wrapped() {
        let filters = filters(&[(
            QueryField::from(AggregateField::Title),
            "\"The Night Watch\"",
        )]);
        assert_eq!(
            build_query_string(None, &filters),
            "title:\"The Night Watch\""
        );
    }

    #[test]
    fn test_text_comes_first_then_filters_in_order() {
        let filters = filters(&[
            (QueryField::from(AggregateField::Where), "Paris"),
            (QueryField::from(SearchField::Type), "IMAGE"),
        ]);
        assert_eq!(
            build_query_string(Some("portrait"), &filters),
            "portrait AND where:Paris AND TYPE:IMAGE"
        );
    }

    #[test]
    fn test_custom_field_renders_verbatim() {
        let filters = filters(&[(QueryField::from("foaf_name"), "Anna")]);
        assert_eq!(build_query_string(None, &filters), "foaf_name:Anna");
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(range(Some(1800), Some(1900)), "[1800 TO 1900]");
        assert_eq!(range(Some(1800), None::<i32>), "[1800 TO *]");
        assert_eq!(range(None::<i32>, Some(1900)), "[* TO 1900]");
        assert_eq!(range(None::<i32>, None::<i32>), "[* TO *]");
    }
}
