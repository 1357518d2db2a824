//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `stock` is an integer counter kept non-negative by the stock ledger;
/// it is never written outside `record_movement`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Sale unit (un, m², pacote, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Sale price per unit
    pub price: f64,
    /// Current stock counter (>= 0)
    pub stock: i32,
    /// Low-stock threshold observed by notification collaborators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Create a product with zero stock
    pub fn new(id: String, name: String, price: f64) -> Self {
        let now = crate::util::now_millis();
        Self {
            id,
            name,
            unit: None,
            price,
            stock: 0,
            min_stock: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the counter sits at or below the low-stock threshold
    pub fn is_below_min_stock(&self) -> bool {
        self.min_stock.is_some_and(|min| self.stock <= min)
    }
}
