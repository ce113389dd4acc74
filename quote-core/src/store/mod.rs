//! Local record stores for products, factories and sales orders.

mod json;
mod records;

pub use json::{JsonStore, Record};
pub use records::{FactoryStore, ImportSummary, OrderStore, ProductStore};
