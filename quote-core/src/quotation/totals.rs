//! Totals over the current line items.

use crate::config::round;
use crate::model::QuotationLineItem;

/// Aggregate figures for a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of quantities.
    pub total_items: u64,
    /// Sum of per-unit volume × quantity, in m³.
    pub total_cbm: f64,
    /// Sum of line totals.
    pub total_value: f64,
}

impl Totals {
    /// Compute totals from scratch.
    pub fn compute(items: &[QuotationLineItem]) -> Self {
        items.iter().fold(Totals::default(), |acc, item| Totals {
            total_items: acc.total_items + u64::from(item.quantity()),
            total_cbm: acc.total_cbm + item.line_cbm(),
            total_value: acc.total_value + item.total(),
        })
    }

    /// Total volume rounded to 2 places.
    pub fn rounded_cbm(&self) -> f64 {
        round::to_places(self.total_cbm, 2)
    }

    /// Total volume for display, e.g. `"1.50"`.
    pub fn cbm_display(&self) -> String {
        round::fixed2(self.total_cbm)
    }

    /// Total value for display, e.g. `"300.00"`.
    pub fn value_display(&self) -> String {
        round::fixed2(self.total_value)
    }
}
