use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::models::ToolRecord;
use super::CatalogError;

/// Supplies the full ordered catalog. Implementations must be idempotent:
/// repeated calls within one process observe the same records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_tools(&self) -> Result<Vec<ToolRecord>, CatalogError>;
}

/// Catalog held directly in memory. Used by tests and embedded snapshots.
pub struct InMemoryCatalog {
    tools: Vec<ToolRecord>,
}

impl InMemoryCatalog {
    pub fn new(tools: Vec<ToolRecord>) -> Self {
        Self {
            tools: dedupe_by_id(tools),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn load_tools(&self) -> Result<Vec<ToolRecord>, CatalogError> {
        Ok(self.tools.clone())
    }
}

/// Catalog backed by a JSON file holding an array of records. The file is
/// read and parsed once; later calls serve the cached snapshot.
pub struct JsonCatalog {
    path: PathBuf,
    cached: Mutex<Option<Vec<ToolRecord>>>,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    fn read_snapshot(&self) -> Result<Vec<ToolRecord>, CatalogError> {
        debug!("loading catalog from {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path)?;
        let tools: Vec<ToolRecord> = serde_json::from_str(&raw)?;
        let tools = dedupe_by_id(tools);
        info!("loaded {} tools from {}", tools.len(), self.path.display());
        Ok(tools)
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    async fn load_tools(&self) -> Result<Vec<ToolRecord>, CatalogError> {
        let mut cached = self.cached.lock();
        if let Some(tools) = cached.as_ref() {
            return Ok(tools.clone());
        }
        let tools = self.read_snapshot()?;
        *cached = Some(tools.clone());
        Ok(tools)
    }
}

/// Drops records whose id was already seen, keeping the first occurrence.
/// Catalog order is otherwise preserved.
fn dedupe_by_id(tools: Vec<ToolRecord>) -> Vec<ToolRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tools.len());
    let mut unique = Vec::with_capacity(tools.len());
    for tool in tools {
        if seen.insert(tool.id.clone()) {
            unique.push(tool);
        } else {
            warn!("duplicate tool id {} dropped from catalog", tool.id);
        }
    }
    unique
}
