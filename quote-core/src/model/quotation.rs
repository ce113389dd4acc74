//! Quotation line items, header details, and currency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{format_dimensions, CatalogItem};

/// Quotation currency.
///
/// Codes other than USD and GBP resolve to EUR, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Currency {
    #[default]
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    /// Resolve a currency code. Unrecognized codes fall back to EUR.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "USD" => Currency::Usd,
            "GBP" => Currency::Gbp,
            _ => Currency::Eur,
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Eur => "€",
        }
    }

    /// ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::from_code(&code)
    }
}

impl std::str::FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Currency::from_code(s))
    }
}

/// Header metadata of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationDetails {
    pub customer_name: String,
    /// Customer contact (usually an email address).
    pub customer_email: String,
    /// Quotation reference, e.g. `QT-2024-001`.
    pub reference: String,
    /// Issue date.
    pub date: NaiveDate,
    pub notes: String,
    pub currency: Currency,
}

impl Default for QuotationDetails {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            reference: String::new(),
            date: chrono::Local::now().date_naive(),
            notes: String::new(),
            currency: Currency::default(),
        }
    }
}

impl QuotationDetails {
    /// Whether a customer block should be printed.
    pub fn has_customer(&self) -> bool {
        !self.customer_name.trim().is_empty()
    }

    /// Whether a notes block should be printed.
    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }
}

/// An editable quotation entry snapshotted from a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLineItem {
    /// Source catalog item id; unique within a quotation.
    pub id: String,
    pub product_code: String,
    pub description: String,
    pub size: Option<String>,
    pub height_cm: f64,
    pub width_cm: f64,
    pub depth_cm: f64,
    /// Per-unit volume in m³.
    pub cbm: f64,
    quantity: u32,
    unit_price: f64,
}

impl QuotationLineItem {
    /// Snapshot a catalog item with quantity 1 at its base price.
    pub fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            product_code: item.product_code.clone(),
            description: item.description.clone(),
            size: item.size.clone(),
            height_cm: item.height_cm,
            width_cm: item.width_cm,
            depth_cm: item.depth_cm,
            cbm: item.cbm,
            quantity: 1,
            unit_price: item.base_price().max(0.0),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Set quantity, clamped to at least 1.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Set unit price; negative or non-finite values become 0.
    pub fn set_unit_price(&mut self, price: f64) {
        self.unit_price = if price.is_finite() && price > 0.0 {
            price
        } else {
            0.0
        };
    }

    /// Line total, always quantity × unit price.
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Volume of the whole line in m³.
    pub fn line_cbm(&self) -> f64 {
        self.cbm * self.quantity as f64
    }

    /// Dimensions label in H×W×D order.
    pub fn dimensions_label(&self) -> String {
        format_dimensions(self.height_cm, self.width_cm, self.depth_cm)
    }
}
