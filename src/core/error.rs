use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum TooldexError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TooldexError>;
