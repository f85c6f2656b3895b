use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

use super::models::{ParsedVoiceQuery, QueryFilters, SortField, SortOrder};
use super::patterns::{
    CATEGORY_HEAD_PATTERN, CATEGORY_TAIL_KEYWORDS, COMMAND_PREFIXES, PRICE_PATTERN, RATING_PATTERN,
    SORT_KEYWORDS, SORT_PATTERN, STOPWORDS, TOKEN_PATTERN,
};
use crate::utils::safe_truncate_ellipsis;

/// Interprets free-text (typically voice-transcribed) search utterances.
///
/// Extraction is a fixed pipeline of strip stages over a working copy of the
/// input: command prefix, rating filter, price filter, category filter, sort
/// directive, then residual tokenization. The stage order is the contract —
/// each stage sees the string as left by the previous one, with no
/// backtracking. Total function: every input yields a well-formed result.
#[derive(Debug, Default)]
pub struct VoiceQueryProcessor;

impl VoiceQueryProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, query: &str) -> ParsedVoiceQuery {
        let mut working = query.to_lowercase().trim().to_string();
        debug!("processing utterance: {}", safe_truncate_ellipsis(&working, 80));

        let mut parsed = ParsedVoiceQuery::default();

        strip_command_prefix(&mut working);
        extract_rating(&mut working, &mut parsed.filters);
        extract_price(&mut working, &mut parsed.filters);
        extract_category(&mut working, &mut parsed.filters);
        extract_sort(&mut working, &mut parsed);

        parsed.search_terms = tokenize(&working);

        debug!(
            "parsed {} terms, filters: {:?}, sort: {:?}/{:?}",
            parsed.search_terms.len(),
            parsed.filters,
            parsed.sort_by,
            parsed.sort_order
        );
        parsed
    }

    /// Flattens a processed utterance into query-string parameters. A key is
    /// present exactly when the corresponding parsed field was set.
    pub fn to_search_params(&self, query: &str) -> HashMap<String, String> {
        let parsed = self.process(query);
        let mut params = HashMap::new();

        if !parsed.search_terms.is_empty() {
            params.insert("q".to_string(), parsed.search_terms.join(" "));
        }
        if let Some(category) = &parsed.filters.category {
            params.insert("category".to_string(), category.clone());
        }
        if let Some(min_rating) = parsed.filters.min_rating {
            params.insert("minRating".to_string(), min_rating.to_string());
        }
        if let Some(max_price) = parsed.filters.max_price {
            params.insert("maxPrice".to_string(), max_price.to_string());
        }
        if let Some(sort_by) = parsed.sort_by {
            params.insert("sortBy".to_string(), sort_by.to_string());
        }
        if let Some(sort_order) = parsed.sort_order {
            params.insert("sortOrder".to_string(), sort_order.to_string());
        }

        params
    }
}

fn strip_command_prefix(working: &mut String) {
    for prefix in COMMAND_PREFIXES {
        if working.starts_with(prefix) {
            let rest = working[prefix.len()..].trim().to_string();
            *working = rest;
            break;
        }
    }
}

fn extract_rating(working: &mut String, filters: &mut QueryFilters) {
    let extracted = RATING_PATTERN.captures(working).and_then(|caps| {
        let range = caps.get(0)?.range();
        let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
        Some((range, value))
    });
    if let Some((range, value)) = extracted {
        filters.min_rating = Some(value);
        working.replace_range(range, "");
    }
}

fn extract_price(working: &mut String, filters: &mut QueryFilters) {
    let extracted = PRICE_PATTERN.captures(working).and_then(|caps| {
        let range = caps.get(0)?.range();
        let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
        Some((range, value))
    });
    if let Some((range, value)) = extracted {
        filters.max_price = Some(value);
        working.replace_range(range, "");
    }
}

/// The category value starts after the `[(in|under|from)] category` head and
/// runs token by token until a closing `category`/`section` keyword (consumed
/// with the clause), a sort keyword (left for the sort stage), or the end of
/// the string.
fn extract_category(working: &mut String, filters: &mut QueryFilters) {
    let Some(head) = CATEGORY_HEAD_PATTERN.find(working) else {
        return;
    };
    let head_range: Range<usize> = head.range();
    let tail_start = head_range.end;

    let mut value_tokens: Vec<String> = Vec::new();
    let mut consumed_end = tail_start;

    for token in TOKEN_PATTERN.find_iter(&working[tail_start..]) {
        let word = token.as_str();
        if SORT_KEYWORDS.contains(&word) {
            break;
        }
        if CATEGORY_TAIL_KEYWORDS.contains(&word) {
            consumed_end = tail_start + token.end();
            break;
        }
        value_tokens.push(word.to_string());
        consumed_end = tail_start + token.end();
    }

    if value_tokens.is_empty() {
        return;
    }

    filters.category = Some(value_tokens.join(" "));
    working.replace_range(head_range.start..consumed_end, "");
}

fn extract_sort(working: &mut String, parsed: &mut ParsedVoiceQuery) {
    let extracted = SORT_PATTERN.captures(working).and_then(|caps| {
        let range = caps.get(0)?.range();
        let field = caps.get(1)?.as_str().parse::<SortField>().ok()?;
        let order = caps.get(2).map(|direction| {
            if direction.as_str().starts_with("desc") {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            }
        });
        Some((range, field, order))
    });
    if let Some((range, field, order)) = extracted {
        parsed.sort_by = Some(field);
        parsed.sort_order = order;
        working.replace_range(range, "");
    }
}

fn tokenize(working: &str) -> Vec<String> {
    working
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(query: &str) -> ParsedVoiceQuery {
        VoiceQueryProcessor::new().process(query)
    }

    #[test]
    fn test_process_is_idempotent() {
        let query = "find chatbots rated above 3 sort by rating descending";
        assert_eq!(process(query), process(query));
    }

    #[test]
    fn test_command_prefix_stripped() {
        let parsed = process("search for cat tools");
        assert_eq!(parsed.search_terms, vec!["cat", "tools"]);
        assert_eq!(parsed.filters, QueryFilters::default());
        assert!(parsed.sort_by.is_none());
        assert!(parsed.sort_order.is_none());
    }

    #[test]
    fn test_longest_prefix_wins_over_search() {
        // "search for" sits before "search" in the prefix table.
        let parsed = process("search for transcription");
        assert_eq!(parsed.search_terms, vec!["transcription"]);

        let parsed = process("search transcription");
        assert_eq!(parsed.search_terms, vec!["transcription"]);
    }

    #[test]
    fn test_rating_filter_extracted() {
        let parsed = process("find tools rated above 4");
        assert_eq!(parsed.filters.min_rating, Some(4.0));
        assert_eq!(parsed.search_terms, vec!["tools"]);
        assert!(!parsed.search_terms.iter().any(|t| t == "rated" || t == "above" || t == "4"));
    }

    #[test]
    fn test_rating_filter_fractional() {
        let parsed = process("tools rating over 4.5");
        assert_eq!(parsed.filters.min_rating, Some(4.5));
    }

    #[test]
    fn test_price_filter_extracted() {
        let parsed = process("show me writing tools under $20");
        assert_eq!(parsed.filters.max_price, Some(20.0));
        assert!(parsed.search_terms.contains(&"writing".to_string()));
        assert!(parsed.search_terms.contains(&"tools".to_string()));
        assert!(!parsed.search_terms.iter().any(|t| t == "under" || t == "20" || t == "$20"));
    }

    #[test]
    fn test_price_filter_without_dollar_sign() {
        let parsed = process("editors cheaper than 15");
        assert_eq!(parsed.filters.max_price, Some(15.0));
        assert_eq!(parsed.search_terms, vec!["editors"]);
    }

    #[test]
    fn test_category_filter_with_preposition() {
        let parsed = process("find tools in category writing");
        assert_eq!(parsed.filters.category.as_deref(), Some("writing"));
        assert_eq!(parsed.search_terms, vec!["tools"]);
    }

    #[test]
    fn test_category_value_stops_before_sort_directive() {
        let parsed = process("in category design sort by rating");
        assert_eq!(parsed.filters.category.as_deref(), Some("design"));
        assert_eq!(parsed.sort_by, Some(SortField::Rating));
        assert!(parsed.search_terms.is_empty());
    }

    #[test]
    fn test_category_trailing_section_keyword_consumed() {
        let parsed = process("from category video editing section");
        assert_eq!(parsed.filters.category.as_deref(), Some("video editing"));
        assert!(parsed.search_terms.is_empty());
    }

    #[test]
    fn test_sort_directive_extracted() {
        let parsed = process("chatbots sort by price ascending");
        assert_eq!(parsed.sort_by, Some(SortField::Price));
        assert_eq!(parsed.sort_order, Some(SortOrder::Asc));
        assert_eq!(parsed.search_terms, vec!["chatbots"]);
    }

    #[test]
    fn test_sort_directive_without_direction() {
        let parsed = process("order by title");
        assert_eq!(parsed.sort_by, Some(SortField::Title));
        assert!(parsed.sort_order.is_none());
    }

    #[test]
    fn test_combined_filters_and_sort() {
        let parsed = process("find chatbots rated above 3 sort by rating descending");
        assert!(parsed.search_terms.contains(&"chatbots".to_string()));
        assert_eq!(parsed.filters.min_rating, Some(3.0));
        assert_eq!(parsed.sort_by, Some(SortField::Rating));
        assert_eq!(parsed.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn test_stopwords_dropped() {
        let parsed = process("the best tools for writing and editing");
        assert!(!parsed.search_terms.iter().any(|t| t == "the" || t == "and"));
        assert!(parsed.search_terms.contains(&"writing".to_string()));
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        assert_eq!(process(""), ParsedVoiceQuery::default());
        assert_eq!(process("   "), ParsedVoiceQuery::default());

        let parsed = process("!?!");
        assert_eq!(parsed.search_terms, vec!["!?!"]);
        assert_eq!(parsed.filters, QueryFilters::default());
    }

    #[test]
    fn test_search_params_mirror_presence() {
        let processor = VoiceQueryProcessor::new();

        let params =
            processor.to_search_params("find chatbots rated above 3 sort by rating descending");
        assert_eq!(params.get("q").map(String::as_str), Some("chatbots"));
        assert_eq!(params.get("minRating").map(String::as_str), Some("3"));
        assert_eq!(params.get("sortBy").map(String::as_str), Some("rating"));
        assert_eq!(params.get("sortOrder").map(String::as_str), Some("desc"));
        assert!(!params.contains_key("maxPrice"));
        assert!(!params.contains_key("category"));

        let params = processor.to_search_params("writing tools under $20 in category writing");
        assert_eq!(params.get("maxPrice").map(String::as_str), Some("20"));
        assert_eq!(params.get("category").map(String::as_str), Some("writing"));
        assert!(!params.contains_key("sortBy"));
        assert!(!params.contains_key("sortOrder"));
        assert!(!params.contains_key("minRating"));
    }

    #[test]
    fn test_search_params_empty_query_has_no_keys() {
        let params = VoiceQueryProcessor::new().to_search_params("   ");
        assert!(params.is_empty());
    }
}
