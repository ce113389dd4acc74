//! Catalog access: readers, filtering and pagination.

mod filter;
mod reader;

pub use filter::{categories, paginate, CatalogFilter, Page, ALL_CATEGORIES};
pub use reader::{CatalogReader, JsonFileCatalog, MemoryCatalog};
