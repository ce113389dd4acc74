//! Catalog readers: the "list all products" source for the quotation builder.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{QuoteError, Result};
use crate::model::CatalogItem;

/// Source of catalog items.
pub trait CatalogReader {
    /// List every product in catalog order.
    fn list_products(&self) -> Result<Vec<CatalogItem>>;
}

/// Catalog stored as a JSON array of product records.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, message: impl ToString) -> QuoteError {
        QuoteError::CatalogUnavailable {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl CatalogReader for JsonFileCatalog {
    fn list_products(&self) -> Result<Vec<CatalogItem>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        let items: Vec<CatalogItem> =
            serde_json::from_str(&content).map_err(|e| self.unavailable(e))?;
        info!("Loaded {} product(s) from {}", items.len(), self.path.display());
        Ok(items)
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    items: Vec<CatalogItem>,
}

impl MemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogReader for MemoryCatalog {
    fn list_products(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.clone())
    }
}
