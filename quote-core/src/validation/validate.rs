//! Form validation for catalog, factory, order and quotation input.

use crate::config::float_cmp;
use crate::error::{QuoteError, Result};
use crate::model::{
    CatalogItem, Factory, OrderItem, QuotationDetails, QuotationLineItem, SalesOrder,
};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }

    /// Convert to an error when validation failed. Warnings are logged.
    pub fn into_result(self) -> Result<Vec<String>> {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
        if self.passed {
            Ok(self.warnings)
        } else {
            Err(QuoteError::Validation {
                message: self.errors.join("; "),
            })
        }
    }
}

/// Validate a product form.
pub fn validate_product(item: &CatalogItem) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if item.product_code.trim().is_empty() {
        result.add_error("Product code is required");
    }

    let dimensions = [
        ("height", item.height_cm),
        ("depth", item.depth_cm),
        ("width", item.width_cm),
        ("CBM", item.cbm),
    ];
    for (field, value) in dimensions {
        if value < 0.0 || !value.is_finite() {
            result.add_error(format!("Invalid {}: {}", field, value));
        }
    }

    let prices = [
        ("FOB USD", item.fob_price_usd),
        ("FOB GBP", item.fob_price_gbp),
        ("warehouse price 1", item.warehouse_price_1),
        ("warehouse price 2", item.warehouse_price_2),
    ];
    for (field, value) in prices {
        if let Some(v) = value {
            if v < 0.0 || !v.is_finite() {
                result.add_error(format!("Invalid {}: {}", field, v));
            }
        }
    }

    if float_cmp::approx_zero(item.cbm) {
        result.add_warning(format!(
            "{}: CBM is zero; container estimates will skip it",
            item.product_code
        ));
    }
    if item.fob_price_usd.is_none() {
        result.add_warning(format!(
            "{}: no FOB USD price; quotations will start at 0",
            item.product_code
        ));
    }

    result
}

/// Validate a factory form.
pub fn validate_factory(factory: &Factory) -> ValidationResult {
    if factory.code.trim().is_empty() || factory.name.trim().is_empty() {
        return ValidationResult::error("Code and Name are required");
    }
    ValidationResult::ok()
}

/// Validate a sales order form.
pub fn validate_order(order: &SalesOrder) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if order.sales_order_ref.trim().is_empty() {
        result.add_error("Sales order reference is required");
    }

    if order.factory_inform_date < order.entry_date {
        result.add_warning(format!(
            "{}: factory inform date {} is before entry date {}",
            order.sales_order_ref, order.factory_inform_date, order.entry_date
        ));
    }

    if order.factory.trim().is_empty() {
        result.add_warning(format!("{}: no factory selected", order.sales_order_ref));
    }

    for (idx, item) in order.items.iter().enumerate() {
        result.merge(validate_order_item(idx + 1, item));
    }

    result
}

/// Validate one sales order line (1-based `line`).
fn validate_order_item(line: usize, item: &OrderItem) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if item.product_code.trim().is_empty() {
        result.add_error(format!("Order line {}: product code is required", line));
    }
    if item.quantity == 0 {
        result.add_error(format!("Order line {}: quantity must be at least 1", line));
    }
    if item.unit_price < 0.0 || !item.unit_price.is_finite() {
        result.add_error(format!("Order line {}: invalid unit price", line));
    }

    result
}

/// Gate for document generation, with advisory warnings.
pub fn validate_quotation(
    details: &QuotationDetails,
    items: &[QuotationLineItem],
) -> ValidationResult {
    if items.is_empty() {
        return ValidationResult::error(QuoteError::EmptyQuotation.to_string());
    }

    let mut result = ValidationResult::ok();

    if !details.has_customer() {
        result.add_warning("No customer name; the customer block will be omitted");
    }

    for item in items {
        if float_cmp::approx_zero(item.unit_price()) {
            result.add_warning(format!("{}: unit price is 0", item.product_code));
        }
        if item.cbm <= 0.0 {
            result.add_warning(format!(
                "{}: no CBM; excluded from container load",
                item.product_code
            ));
        }
    }

    result
}
