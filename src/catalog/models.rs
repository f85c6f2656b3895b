use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One directory entry. `id` is the only field guaranteed unique across the
/// catalog; everything else is display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    /// Semantically in [0, 5].
    pub rating: f64,
    pub description: String,
    /// Free-text descriptor, substring-matched ("Free", "$29/mo", ...).
    pub pricing: String,
    /// Ordered; duplicates are preserved as loaded.
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub favicon: Option<String>,
}

impl ToolRecord {
    pub fn builder() -> ToolRecordBuilder {
        ToolRecordBuilder::default()
    }
}

#[derive(Default)]
pub struct ToolRecordBuilder {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    subcategory: Option<String>,
    rating: Option<f64>,
    description: Option<String>,
    pricing: Option<String>,
    tags: Option<Vec<String>>,
    url: Option<String>,
    favicon: Option<String>,
}

impl ToolRecordBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn pricing(mut self, pricing: impl Into<String>) -> Self {
        self.pricing = Some(pricing.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    pub fn build(self) -> ToolRecord {
        ToolRecord {
            id: self.id.unwrap_or_else(|| {
                let hex = uuid::Uuid::new_v4().simple().to_string();
                format!("tool_{}", crate::utils::safe_truncate(&hex, 12))
            }),
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_else(|| "uncategorized".to_string()),
            subcategory: self.subcategory.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            description: self.description.unwrap_or_default(),
            pricing: self.pricing.unwrap_or_else(|| "Unknown".to_string()),
            tags: self.tags.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            favicon: self.favicon,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_tools: usize,
    pub tools_by_category: HashMap<String, usize>,
    pub avg_rating: f64,
    pub loaded_at: String,
}

pub fn catalog_stats(tools: &[ToolRecord]) -> CatalogStats {
    let mut tools_by_category: HashMap<String, usize> = HashMap::new();
    for tool in tools {
        *tools_by_category.entry(tool.category.clone()).or_insert(0) += 1;
    }

    let avg_rating = if tools.is_empty() {
        0.0
    } else {
        tools.iter().map(|t| t.rating).sum::<f64>() / tools.len() as f64
    };

    CatalogStats {
        total_tools: tools.len(),
        tools_by_category,
        avg_rating,
        loaded_at: Utc::now().to_rfc3339(),
    }
}
