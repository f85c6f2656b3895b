use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use super::cache::QueryCache;
use crate::catalog::{CatalogSource, ToolRecord};
use crate::core::error::Result;
use crate::voice::{ParsedVoiceQuery, SortField, SortOrder};
use crate::{DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL};

lazy_static::lazy_static! {
    static ref NUMBER_PATTERN: regex::Regex =
        regex::Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid");
}

/// Runs a parsed voice query against the catalog: term matching, rating and
/// price filters, field sort. Result lists are cached per query.
pub struct SearchEngine {
    source: Arc<dyn CatalogSource>,
    cache: QueryCache<Vec<ToolRecord>>,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_cache(source, DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL)
    }

    pub fn with_cache(source: Arc<dyn CatalogSource>, cache_size: usize, cache_ttl: u64) -> Self {
        Self {
            source,
            cache: QueryCache::new(cache_size, cache_ttl),
        }
    }

    pub async fn search(&self, parsed: &ParsedVoiceQuery) -> Result<Vec<ToolRecord>> {
        let key = query_key(parsed);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let catalog = self.source.load_tools().await?;
        let results = apply_query(&catalog, parsed);
        debug!("{} of {} tools match query", results.len(), catalog.len());

        self.cache.set(&key, results.clone());
        Ok(results)
    }

    pub fn cache_stats(&self) -> super::cache::CacheStats {
        self.cache.stats()
    }
}

fn query_key(parsed: &ParsedVoiceQuery) -> String {
    let serialized = serde_json::to_string(parsed).unwrap_or_default();
    QueryCache::<Vec<ToolRecord>>::make_key(&[&serialized])
}

fn apply_query(catalog: &[ToolRecord], parsed: &ParsedVoiceQuery) -> Vec<ToolRecord> {
    let mut results: Vec<ToolRecord> = catalog
        .iter()
        .filter(|tool| matches_terms(tool, &parsed.search_terms))
        .filter(|tool| {
            parsed
                .filters
                .min_rating
                .is_none_or(|min| tool.rating >= min)
        })
        .filter(|tool| match parsed.filters.max_price {
            // A price cap is a hard filter: records with no parsable price
            // are dropped rather than assumed affordable.
            Some(max) => price_value(&tool.pricing).is_some_and(|price| price <= max),
            None => true,
        })
        .filter(|tool| {
            parsed
                .filters
                .category
                .as_deref()
                .is_none_or(|category| tool.category.eq_ignore_ascii_case(category))
        })
        .cloned()
        .collect();

    if let Some(field) = parsed.sort_by {
        sort_results(&mut results, field, parsed.sort_order, &parsed.search_terms);
    }

    results
}

/// A record matches when any term appears (case-insensitively) in its name,
/// description, category, subcategory, or tags. Empty terms match everything.
fn matches_terms(tool: &ToolRecord, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let haystack = search_haystack(tool);
    terms.iter().any(|term| haystack.contains(term.as_str()))
}

fn search_haystack(tool: &ToolRecord) -> String {
    format!(
        "{} {} {} {} {}",
        tool.name,
        tool.description,
        tool.category,
        tool.subcategory,
        tool.tags.join(" ")
    )
    .to_lowercase()
}

/// Number of query terms that hit the record; the `relevance` sort key.
fn relevance(tool: &ToolRecord, terms: &[String]) -> usize {
    let haystack = search_haystack(tool);
    terms.iter().filter(|term| haystack.contains(term.as_str())).count()
}

/// Maps a free-text pricing descriptor onto a comparable number: "free"
/// anywhere means 0, otherwise the first embedded number wins.
fn price_value(pricing: &str) -> Option<f64> {
    let lowered = pricing.to_lowercase();
    if lowered.contains("free") {
        return Some(0.0);
    }
    NUMBER_PATTERN
        .find(&lowered)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Rating and relevance default to descending, price and title to ascending;
/// an explicit direction from the utterance overrides. `date` keeps catalog
/// order, since records carry no date. Sorts are stable, so ties keep
/// catalog order.
fn sort_results(
    results: &mut [ToolRecord],
    field: SortField,
    order: Option<SortOrder>,
    terms: &[String],
) {
    if field == SortField::Date {
        return;
    }
    let effective = order.unwrap_or(match field {
        SortField::Rating | SortField::Relevance => SortOrder::Desc,
        _ => SortOrder::Asc,
    });

    let ascending = |a: &ToolRecord, b: &ToolRecord| -> Ordering {
        match field {
            SortField::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal),
            SortField::Price => {
                let pa = price_value(&a.pricing).unwrap_or(f64::MAX);
                let pb = price_value(&b.pricing).unwrap_or(f64::MAX);
                pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
            }
            SortField::Title => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Relevance => relevance(a, terms).cmp(&relevance(b, terms)),
            SortField::Date => Ordering::Equal,
        }
    };

    match effective {
        SortOrder::Asc => results.sort_by(|a, b| ascending(a, b)),
        SortOrder::Desc => results.sort_by(|a, b| ascending(b, a)),
    }
}
