use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_CATALOG_PATH, DEFAULT_RECOMMEND_LIMIT,
    DEFAULT_REQUEST_TIMEOUT, MAX_VOICE_SUGGESTIONS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooldexConfig {
    /// Path of the JSON catalog snapshot.
    pub catalog_path: String,
    /// Base URL of a remote catalog service, when one is used instead of the file.
    pub catalog_url: Option<String>,
    pub request_timeout: u64,

    pub default_recommend_limit: usize,
    pub max_suggestions: usize,

    pub cache_size: usize,
    pub cache_ttl: u64,
}

impl TooldexConfig {
    pub fn new(catalog_path: &str) -> Self {
        Self {
            catalog_path: catalog_path.to_string(),
            catalog_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,

            default_recommend_limit: DEFAULT_RECOMMEND_LIMIT,
            max_suggestions: MAX_VOICE_SUGGESTIONS,

            cache_size: DEFAULT_CACHE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new(
            &std::env::var("TOOLDEX_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string()),
        );

        if let Ok(url) = std::env::var("TOOLDEX_CATALOG_URL") {
            config.catalog_url = Some(url);
        }
        if let Ok(timeout) = std::env::var("TOOLDEX_REQUEST_TIMEOUT") {
            if let Ok(timeout) = timeout.parse() {
                config.request_timeout = timeout;
            }
        }
        if let Ok(limit) = std::env::var("TOOLDEX_RECOMMEND_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.default_recommend_limit = limit;
            }
        }
        if let Ok(size) = std::env::var("TOOLDEX_CACHE_SIZE") {
            if let Ok(size) = size.parse() {
                config.cache_size = size;
            }
        }
        if let Ok(ttl) = std::env::var("TOOLDEX_CACHE_TTL") {
            if let Ok(ttl) = ttl.parse() {
                config.cache_ttl = ttl;
            }
        }

        config
    }
}

impl Default for TooldexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}
