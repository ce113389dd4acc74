//! quote-core - Core library for furniture export quotations.
//!
//! This library loads a product catalog, assembles a quotation from selected
//! products with editable quantities and prices, estimates shipping container
//! usage, and renders a standalone printable HTML document. It also keeps the
//! product, factory and sales order records behind the catalog.
//!
//! # Example
//!
//! ```no_run
//! use quote_core::{IssuerConfig, JsonFileCatalog, QuotationRequest, build_quotation};
//!
//! let catalog = JsonFileCatalog::new("products.json");
//! let request = QuotationRequest {
//!     selected: vec!["PRD-0001".to_string()],
//!     quantities: vec![("PRD-0001".to_string(), "3".to_string())],
//!     ..Default::default()
//! };
//! let html = build_quotation(&catalog, &request, &IssuerConfig::default()).unwrap();
//! println!("{}", html);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod quotation;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use catalog::{CatalogFilter, CatalogReader, JsonFileCatalog, MemoryCatalog, Page};
pub use config::IssuerConfig;
pub use error::{QuoteError, Result};
pub use generator::{generate_quotation_html, DocumentSurface, FileSurface, MemorySurface};
pub use model::{
    CatalogItem, Currency, Factory, OrderStatus, QuotationDetails, QuotationLineItem, SalesOrder,
};
pub use quotation::{ContainerEstimate, ContainerType, QuotationSession, Totals};
pub use store::{FactoryStore, ImportSummary, OrderStore, ProductStore};
pub use validation::ValidationResult;

/// Everything needed to assemble one quotation in a single pass.
#[derive(Debug, Clone, Default)]
pub struct QuotationRequest {
    /// Catalog ids to select, in order.
    pub selected: Vec<String>,
    /// `(id, raw quantity)` edits applied after selection.
    pub quantities: Vec<(String, String)>,
    /// `(id, raw price)` edits applied after selection.
    pub prices: Vec<(String, String)>,
    /// Ids removed after edits.
    pub removals: Vec<String>,
    pub details: QuotationDetails,
}

/// Assemble a quotation session from a catalog and a request.
///
/// The pipeline mirrors the interactive flow:
/// 1. Load the catalog (a failure leaves it empty)
/// 2. Open the selection, toggle each id, confirm
/// 3. Apply quantity and price edits, then removals
///
/// Edits for ids that are not in the quotation are logged and ignored.
pub fn assemble_quotation<R: CatalogReader + ?Sized>(
    reader: &R,
    request: &QuotationRequest,
) -> QuotationSession {
    let mut session = QuotationSession::from_load(reader.list_products());
    session.details = request.details.clone();

    session.open_selection();
    for id in &request.selected {
        if !session.candidates().contains(id) {
            session.toggle_candidate(id);
        }
    }
    session.confirm_selection();

    for (id, raw) in &request.quantities {
        if !session.update_quantity(id, raw) {
            tracing::warn!("Quantity for {} ignored: not in quotation", id);
        }
    }
    for (id, raw) in &request.prices {
        if !session.update_price(id, raw) {
            tracing::warn!("Price for {} ignored: not in quotation", id);
        }
    }
    for id in &request.removals {
        if !session.remove_item(id) {
            tracing::warn!("Remove of {} ignored: not in quotation", id);
        }
    }

    session
}

/// Assemble a quotation and render its printable document.
///
/// Fails when no line items remain after the request is applied.
pub fn build_quotation<R: CatalogReader + ?Sized>(
    reader: &R,
    request: &QuotationRequest,
    issuer: &IssuerConfig,
) -> Result<String> {
    let session = assemble_quotation(reader, request);
    if let Some(message) = session.load_error() {
        tracing::warn!("Catalog unavailable: {}", message);
    }
    session.render_document(issuer)
}
