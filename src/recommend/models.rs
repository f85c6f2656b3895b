use serde::{Deserialize, Serialize};

use crate::DEFAULT_RECOMMEND_LIMIT;

/// Context for one "related tools" lookup. Missing optional fields degrade to
/// "no exclusion" / "no filter" rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Tool the widget is shown on; always excluded from the result.
    pub current_tool_id: Option<String>,
    /// Strict case-insensitive category filter.
    pub category: Option<String>,
    /// Scoring signal; candidates sharing more tags rank earlier.
    pub tags: Vec<String>,
    pub limit: usize,
}

impl RecommendationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_tool(tool_id: impl Into<String>) -> Self {
        Self {
            current_tool_id: Some(tool_id.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            current_tool_id: None,
            category: None,
            tags: Vec::new(),
            limit: DEFAULT_RECOMMEND_LIMIT,
        }
    }
}
