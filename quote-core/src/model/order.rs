//! Sales order records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    #[serde(rename = "In Production")]
    InProduction,
    Shipped,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Draft => write!(f, "Draft"),
            OrderStatus::Confirmed => write!(f, "Confirmed"),
            OrderStatus::InProduction => write!(f, "In Production"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Completed => write!(f, "Completed"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "draft" => Ok(OrderStatus::Draft),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "in production" => Ok(OrderStatus::InProduction),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!(
                "Invalid order status: {}. Use draft, confirmed, in-production, shipped, completed, or cancelled",
                s
            )),
        }
    }
}

/// A product line on a sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_code: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: f64,
}

/// A sales order placed by a buyer and passed on to a factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(default)]
    pub id: String,
    /// Internal sales order reference, e.g. `SO-2024-001`. Required.
    pub sales_order_ref: String,
    #[serde(default)]
    pub buyer_po_ref: String,
    #[serde(default)]
    pub buyer_name: String,
    pub entry_date: NaiveDate,
    pub factory_inform_date: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
    /// Factory label (`CODE - Name`).
    #[serde(default)]
    pub factory: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl SalesOrder {
    /// Create a draft order dated today.
    pub fn new(sales_order_ref: impl Into<String>) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            id: String::new(),
            sales_order_ref: sales_order_ref.into(),
            buyer_po_ref: String::new(),
            buyer_name: String::new(),
            entry_date: today,
            factory_inform_date: today,
            status: OrderStatus::Draft,
            factory: String::new(),
            items: Vec::new(),
        }
    }

    /// Order value across all lines.
    pub fn total_value(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.quantity as f64 * item.unit_price)
            .sum()
    }
}
