//! Data model for catalog, quotation, factory and order records.

mod catalog;
mod factory;
mod order;
mod quotation;

pub use catalog::{compute_cbm, CatalogItem};
pub use factory::Factory;
pub use order::{OrderItem, OrderStatus, SalesOrder};
pub use quotation::{Currency, QuotationDetails, QuotationLineItem};
