//! Catalog item definition as served by the product catalog.

use serde::{Deserialize, Deserializer, Serialize};

/// A sellable product record.
///
/// The quotation builder treats these as read-only. Numeric fields are
/// lenient on input: `null`, missing, and numeric strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique product identifier.
    pub id: String,
    /// Product code (SKU), unique case-insensitively.
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-text size label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height_cm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub depth_cm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width_cm: f64,
    /// Packed volume in cubic meters.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cbm: f64,
    /// FOB price in the base currency (USD).
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub fob_price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub fob_price_gbp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub warehouse_price_1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub warehouse_price_2: Option<f64>,
    /// Primary image (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Additional images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Set by lite listings where image payloads are fetched separately.
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub has_image_2: bool,
}

impl CatalogItem {
    /// Create a catalog item with the fields the quotation builder uses.
    pub fn new(id: impl Into<String>, product_code: impl Into<String>, cbm: f64) -> Self {
        Self {
            id: id.into(),
            product_code: product_code.into(),
            cbm,
            ..Default::default()
        }
    }

    /// Base-currency price, zero when absent.
    pub fn base_price(&self) -> f64 {
        self.fob_price_usd.unwrap_or(0.0)
    }

    /// All images, primary first.
    pub fn all_images(&self) -> Vec<&str> {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .into_iter()
            .chain(self.images.iter().map(|s| s.as_str()))
            .collect()
    }

    /// Whether the product has images, including ones not yet fetched.
    pub fn has_images(&self) -> bool {
        self.has_image || self.has_image_2 || !self.all_images().is_empty()
    }

    /// Dimensions label in H×W×D order.
    pub fn dimensions_label(&self) -> String {
        format_dimensions(self.height_cm, self.width_cm, self.depth_cm)
    }
}

/// Format dimensions as `H×W×D`, dropping trailing zero decimals.
pub fn format_dimensions(height: f64, width: f64, depth: f64) -> String {
    format!("{}×{}×{}", height, width, depth)
}

/// Compute packed volume in m³ from centimeter dimensions, rounded to 3 places.
///
/// Returns `None` unless all three dimensions are non-zero.
pub fn compute_cbm(height_cm: f64, depth_cm: f64, width_cm: f64) -> Option<f64> {
    if height_cm == 0.0 || depth_cm == 0.0 || width_cm == 0.0 {
        return None;
    }
    let cbm = height_cm * depth_cm * width_cm / 1_000_000.0;
    Some(crate::config::round::to_places(cbm, 3))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}
