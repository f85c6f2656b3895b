pub mod catalog;
pub mod core;
pub mod recommend;
pub mod search;
pub mod utils;
pub mod voice;

pub use utils::{safe_truncate, safe_truncate_ellipsis};

pub use catalog::{
    catalog_stats, CatalogError, CatalogSource, CatalogStats, InMemoryCatalog, JsonCatalog,
    RemoteCatalog, ToolRecord,
};
pub use crate::core::config::TooldexConfig;
pub use crate::core::error::{Result, TooldexError};
pub use recommend::{RecommendationRequest, Recommender};
pub use search::{QueryCache, SearchEngine};
pub use voice::{
    generate_suggestions, ParsedVoiceQuery, QueryFilters, SortField, SortOrder,
    VoiceQueryProcessor,
};

/// How many related tools a recommendation request asks for by default.
pub const DEFAULT_RECOMMEND_LIMIT: usize = 3;

/// Hard cap on voice search suggestions.
pub const MAX_VOICE_SUGGESTIONS: usize = 10;

pub const DEFAULT_CACHE_SIZE: usize = 1000;

pub const DEFAULT_CACHE_TTL: u64 = 300;

pub const DEFAULT_CATALOG_PATH: &str = "data/tools.json";

pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
