use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Field a voice query asks to sort by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Rating,
    Price,
    Date,
    Title,
    Relevance,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filters extracted from an utterance. All optional; an empty set means the
/// utterance carried no recognizable filter phrases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub max_price: Option<f64>,
}

/// Structured result of interpreting one utterance. Built fresh per call and
/// carries no state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedVoiceQuery {
    /// Lowercase residual tokens left after command/filter extraction.
    pub search_terms: Vec<String>,
    pub filters: QueryFilters,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!(SortField::from_str("rating"), Ok(SortField::Rating));
        assert_eq!(SortField::from_str("relevance"), Ok(SortField::Relevance));
        assert!(SortField::from_str("popularity").is_err());
    }

    #[test]
    fn test_sort_enums_display_lowercase() {
        assert_eq!(SortField::Title.to_string(), "title");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn test_default_query_is_empty() {
        let parsed = ParsedVoiceQuery::default();
        assert!(parsed.search_terms.is_empty());
        assert_eq!(parsed.filters, QueryFilters::default());
        assert!(parsed.sort_by.is_none());
        assert!(parsed.sort_order.is_none());
    }
}
