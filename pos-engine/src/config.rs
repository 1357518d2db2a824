//! Engine configuration
//!
//! One explicit config object passed into the managers; no ambient
//! globals. Defaults match counter-scale operation for a small print
//! shop.

use serde::{Deserialize, Serialize};

/// Engine limits and numbering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum accepted single payment
    pub max_payment_amount: f64,
    /// Maximum unit price per order item
    pub max_unit_price: f64,
    /// Maximum quantity per order item
    pub max_item_quantity: i32,
    /// Maximum installment count for payment plans
    pub max_installments: u32,
    /// Prefix for human-facing order numbers
    pub order_number_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_payment_amount: 1_000_000.0,
            max_unit_price: 1_000_000.0,
            max_item_quantity: 9999,
            max_installments: 12,
            order_number_prefix: "OS".to_string(),
        }
    }
}
