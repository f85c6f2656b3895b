use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use super::models::ToolRecord;
use super::store::CatalogSource;
use super::CatalogError;
use crate::DEFAULT_REQUEST_TIMEOUT;

/// Catalog served by a remote directory service as `GET {base_url}/tools`,
/// returning a JSON array of records.
pub struct RemoteCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteCatalog {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        info!("RemoteCatalog created for {}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self, CatalogError> {
        let base_url = std::env::var("TOOLDEX_CATALOG_URL")
            .map_err(|_| CatalogError::InvalidPayload("TOOLDEX_CATALOG_URL not set".to_string()))?;
        let timeout = std::env::var("TOOLDEX_REQUEST_TIMEOUT")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self::new(&base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn load_tools(&self) -> Result<Vec<ToolRecord>, CatalogError> {
        let url = format!("{}/tools", self.base_url);
        debug!("fetching catalog from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let tools: Vec<ToolRecord> = response.json().await?;

        debug!("fetched {} tools", tools.len());
        Ok(tools)
    }
}
