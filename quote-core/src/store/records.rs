//! Product, factory and order stores with their form gates.

use tracing::info;

use crate::catalog::CatalogReader;
use crate::config::float_cmp;
use crate::error::{QuoteError, Result};
use crate::model::{compute_cbm, CatalogItem, Factory, SalesOrder};
use crate::parser::SpreadsheetRows;
use crate::validation::{validate_factory, validate_order, validate_product};

use super::json::{JsonStore, Record};

pub type ProductStore = JsonStore<CatalogItem>;
pub type FactoryStore = JsonStore<Factory>;
pub type OrderStore = JsonStore<SalesOrder>;

impl Record for CatalogItem {
    const KIND: &'static str = "Product";
    const PREFIX: &'static str = "PRD";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Factory {
    const KIND: &'static str = "Factory";
    const PREFIX: &'static str = "FAC";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for SalesOrder {
    const KIND: &'static str = "Order";
    const PREFIX: &'static str = "SO";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Outcome of a spreadsheet import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Fill CBM from dimensions when it was left at zero.
fn fill_cbm(item: &mut CatalogItem) {
    if float_cmp::approx_zero(item.cbm) {
        if let Some(cbm) = compute_cbm(item.height_cm, item.depth_cm, item.width_cm) {
            item.cbm = cbm;
        }
    }
}

impl JsonStore<CatalogItem> {
    /// Find a product by code, ignoring case.
    pub fn find_by_code(&self, code: &str) -> Option<&CatalogItem> {
        let code = code.trim().to_lowercase();
        self.list()
            .iter()
            .find(|p| p.product_code.trim().to_lowercase() == code)
    }

    /// Add a new product. Duplicate codes are rejected.
    pub fn create_product(&mut self, mut item: CatalogItem) -> Result<String> {
        validate_product(&item).into_result()?;
        if self.find_by_code(&item.product_code).is_some() {
            return Err(QuoteError::DuplicateProductCode {
                code: item.product_code,
            });
        }
        fill_cbm(&mut item);
        item.id.clear();
        Ok(self.insert(item))
    }

    /// Replace an existing product's fields.
    pub fn update_product(&mut self, id: &str, mut item: CatalogItem) -> Result<()> {
        validate_product(&item).into_result()?;
        fill_cbm(&mut item);
        self.replace(id, item)
    }

    /// Upsert spreadsheet rows by product code.
    pub fn import(&mut self, rows: SpreadsheetRows) -> ImportSummary {
        let mut summary = ImportSummary {
            skipped: rows.skipped_rows.len(),
            ..Default::default()
        };

        for mut item in rows.items {
            if !validate_product(&item).passed {
                summary.skipped += 1;
                continue;
            }
            fill_cbm(&mut item);
            let existing_id = self.find_by_code(&item.product_code).map(|p| p.id.clone());
            match existing_id {
                Some(id) => {
                    if let Some(slot) = self.get_mut(&id) {
                        merge_imported(slot, item);
                        summary.updated += 1;
                    }
                }
                None => {
                    item.id.clear();
                    self.insert(item);
                    summary.created += 1;
                }
            }
        }

        info!(
            "Imported products: {} created, {} updated, {} skipped",
            summary.created, summary.updated, summary.skipped
        );
        summary
    }
}

/// Overwrite catalog fields from an imported row, keeping id and images.
fn merge_imported(existing: &mut CatalogItem, imported: CatalogItem) {
    let CatalogItem {
        id,
        image,
        images,
        has_image,
        has_image_2,
        ..
    } = std::mem::take(existing);
    *existing = CatalogItem {
        id,
        image,
        images,
        has_image,
        has_image_2,
        ..imported
    };
}

impl CatalogReader for JsonStore<CatalogItem> {
    fn list_products(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.list().to_vec())
    }
}

impl JsonStore<Factory> {
    /// Add a factory after checking code and name.
    pub fn create_factory(&mut self, mut factory: Factory) -> Result<String> {
        validate_factory(&factory).into_result()?;
        factory.id.clear();
        Ok(self.insert(factory))
    }

    /// Replace a factory's code and name.
    pub fn update_factory(&mut self, id: &str, factory: Factory) -> Result<()> {
        validate_factory(&factory).into_result()?;
        self.replace(id, factory)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Factory> {
        self.list()
            .iter()
            .find(|f| f.code.eq_ignore_ascii_case(code.trim()))
    }
}

impl JsonStore<SalesOrder> {
    /// Add a sales order after checking its reference.
    pub fn create_order(&mut self, mut order: SalesOrder) -> Result<String> {
        validate_order(&order).into_result()?;
        order.id.clear();
        Ok(self.insert(order))
    }

    /// Replace an existing order.
    pub fn update_order(&mut self, id: &str, order: SalesOrder) -> Result<()> {
        validate_order(&order).into_result()?;
        self.replace(id, order)
    }
}
