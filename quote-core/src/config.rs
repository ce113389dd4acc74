//! Configuration constants and settings for quotation generation.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Usable volume of a 20' container in m³.
pub const CONTAINER_20FT_CBM: f64 = 28.0;

/// Usable volume of a 40' container in m³.
pub const CONTAINER_40FT_CBM: f64 = 58.0;

/// Usable volume of a 40' high-cube container in m³.
pub const CONTAINER_40HQ_CBM: f64 = 68.0;

/// Load volume used by the printed document for per-line load and fill figures.
///
/// Differs from [`CONTAINER_40HQ_CBM`]; both figures are kept as quoted to customers.
pub const DOCUMENT_LOAD_CBM: f64 = 76.0;

/// Catalog page size.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Wait between opening the document surface and requesting print.
pub const PRINT_DELAY: Duration = Duration::from_millis(500);

/// Default quotation currency code.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Issuer branding printed on the quotation header and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Company name shown in the document header.
    pub company_name: String,
    /// Short line under the company name.
    pub tagline: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    /// Footer disclaimer.
    pub disclaimer: String,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            company_name: "Furniture Export Co.".to_string(),
            tagline: "Quality furniture for export".to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            disclaimer: "Prices are FOB and valid for 30 days from the date of issue. \
                         Container loads are estimates and depend on final packing."
                .to_string(),
        }
    }
}

impl IssuerConfig {
    /// Load issuer branding from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Rounding and formatting helpers for money and volume figures.
pub mod round {
    /// Round to a fixed number of decimal places.
    #[inline]
    pub fn to_places(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    }

    /// Format with two decimals, e.g. `1.5` -> `"1.50"`.
    ///
    /// Ties round away from zero: `0.125` -> `"0.13"`.
    #[inline]
    pub fn fixed2(value: f64) -> String {
        format!("{:.2}", to_places(value, 2))
    }

    /// Format with one decimal, ties away from zero.
    #[inline]
    pub fn fixed1(value: f64) -> String {
        format!("{:.1}", to_places(value, 1))
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }

    /// Check if a float is finite and meaningfully above zero.
    #[inline]
    pub fn is_positive(a: f64) -> bool {
        a.is_finite() && a > EPS
    }
}
