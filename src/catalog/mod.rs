pub mod models;
pub mod remote;
pub mod store;

pub use models::{catalog_stats, CatalogStats, ToolRecord, ToolRecordBuilder};
pub use remote::RemoteCatalog;
pub use store::{CatalogSource, InMemoryCatalog, JsonCatalog};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(String),
}
