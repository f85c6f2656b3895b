use std::sync::Arc;
use tracing::debug;

use super::models::RecommendationRequest;
use crate::catalog::{CatalogSource, ToolRecord};
use crate::core::error::Result;

/// Produces "related tools" lists: exclusion, strict category filter,
/// tag-overlap ranking, then deterministic backfill from the unfiltered
/// catalog when the candidate set comes up short.
pub struct Recommender {
    source: Arc<dyn CatalogSource>,
}

impl Recommender {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<ToolRecord>> {
        let catalog = self.source.load_tools().await?;
        debug!(
            "recommending from {} tools (current: {:?}, category: {:?}, {} tags, limit {})",
            catalog.len(),
            request.current_tool_id,
            request.category,
            request.tags.len(),
            request.limit
        );

        let mut candidates: Vec<ToolRecord> = catalog
            .iter()
            .filter(|tool| request.current_tool_id.as_deref() != Some(tool.id.as_str()))
            .cloned()
            .collect();

        if let Some(category) = &request.category {
            candidates.retain(|tool| tool.category.eq_ignore_ascii_case(category));
        }

        if !request.tags.is_empty() {
            // Scores live in a parallel structure so the transient field
            // never leaks into ToolRecord. The sort is stable; ties keep
            // catalog order.
            let mut scored: Vec<(ToolRecord, usize)> = candidates
                .into_iter()
                .map(|tool| {
                    let score = tag_match_count(&tool, &request.tags);
                    (tool, score)
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            candidates = scored.into_iter().map(|(tool, _)| tool).collect();
        }

        if candidates.len() >= request.limit {
            candidates.truncate(request.limit);
            return Ok(candidates);
        }

        // Backfill from the original unfiltered catalog, in catalog order,
        // still never re-admitting the current tool.
        for tool in &catalog {
            if candidates.len() >= request.limit {
                break;
            }
            if request.current_tool_id.as_deref() == Some(tool.id.as_str()) {
                continue;
            }
            if candidates.iter().any(|kept| kept.id == tool.id) {
                continue;
            }
            candidates.push(tool.clone());
        }

        Ok(candidates)
    }
}

/// Number of (candidate tag, request tag) case-insensitive equal pairs.
/// Multiplicity counts on both sides; duplicates are not collapsed.
fn tag_match_count(tool: &ToolRecord, tags: &[String]) -> usize {
    tool.tags
        .iter()
        .map(|candidate| {
            tags.iter()
                .filter(|requested| requested.eq_ignore_ascii_case(candidate))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn tool(id: &str, category: &str, tags: &[&str]) -> ToolRecord {
        ToolRecord::builder()
            .id(id)
            .name(id.to_uppercase())
            .category(category)
            .tags(tags.iter().map(|t| t.to_string()).collect())
            .build()
    }

    fn recommender(tools: Vec<ToolRecord>) -> Recommender {
        Recommender::new(Arc::new(InMemoryCatalog::new(tools)))
    }

    fn ids(tools: &[ToolRecord]) -> Vec<&str> {
        tools.iter().map(|t| t.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_current_tool_never_returned() {
        let ranker = recommender(vec![
            tool("x", "Writing", &[]),
            tool("b", "Writing", &[]),
            tool("c", "Writing", &[]),
            tool("d", "Writing", &[]),
        ]);
        let request = RecommendationRequest::for_tool("x").with_limit(10);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert!(!result.iter().any(|t| t.id == "x"));
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_tag_overlap_orders_candidates() {
        let query_tags = vec!["seo".to_string(), "copywriting".to_string()];
        let ranker = recommender(vec![
            tool("c", "Writing", &["video"]),
            tool("a", "Writing", &["seo", "copywriting"]),
            tool("b", "Writing", &["seo"]),
        ]);
        let request = RecommendationRequest::new().with_tags(query_tags).with_limit(3);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_tag_scoring_counts_multiplicity() {
        // Duplicate candidate tags inflate the score; preserved behavior.
        let ranker = recommender(vec![
            tool("single", "Writing", &["seo"]),
            tool("double", "Writing", &["seo", "seo"]),
        ]);
        let request = RecommendationRequest::new()
            .with_tags(vec!["SEO".to_string()])
            .with_limit(2);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["double", "single"]);
    }

    #[tokio::test]
    async fn test_ties_keep_catalog_order() {
        let ranker = recommender(vec![
            tool("first", "Writing", &["seo"]),
            tool("second", "Writing", &["seo"]),
            tool("third", "Writing", &["seo"]),
        ]);
        let request = RecommendationRequest::new()
            .with_tags(vec!["seo".to_string()])
            .with_limit(3);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_backfill_after_category_filter() {
        // Category matches one record, limit is three: the match leads, then
        // the remaining catalog in original order.
        let ranker = recommender(vec![
            tool("a", "Writing", &[]),
            tool("b", "Design", &[]),
            tool("c", "Writing", &[]),
            tool("d", "Video", &[]),
            tool("e", "Audio", &[]),
            tool("current", "Design", &[]),
        ]);
        let request = RecommendationRequest::for_tool("current")
            .with_category("design")
            .with_limit(3);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_short_catalog_returns_everything_available() {
        let ranker = recommender(vec![tool("a", "Writing", &[]), tool("b", "Writing", &[])]);
        let request = RecommendationRequest::for_tool("a").with_limit(3);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[tokio::test]
    async fn test_empty_tags_preserve_catalog_order() {
        let ranker = recommender(vec![
            tool("z", "Writing", &["a"]),
            tool("y", "Writing", &["b"]),
            tool("x", "Writing", &["c"]),
        ]);
        let request = RecommendationRequest::new().with_limit(3);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["z", "y", "x"]);
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_empty_result() {
        let ranker = recommender(vec![]);
        let result = ranker
            .recommend(&RecommendationRequest::new())
            .await
            .expect("recommend");
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_category_filter_is_case_insensitive() {
        let ranker = recommender(vec![
            tool("a", "WRITING", &[]),
            tool("b", "Design", &[]),
        ]);
        let request = RecommendationRequest::new().with_category("writing").with_limit(1);
        let result = ranker.recommend(&request).await.expect("recommend");
        assert_eq!(ids(&result), vec!["a"]);
    }
}
