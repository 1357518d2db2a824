//! Stock movement types
//!
//! Movements form an append-only audit log per product. `In`/`Out`
//! carry deltas; `Adjustment` carries the new absolute counter value.
//! The distinction is in the type so callers cannot confuse the two.

use serde::{Deserialize, Serialize};

/// Movement type recorded in the audit log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementType::In => write!(f, "IN"),
            MovementType::Out => write!(f, "OUT"),
            MovementType::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

/// Requested stock operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "quantity", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockOperation {
    /// Receive `quantity` units (delta)
    In(i32),
    /// Dispatch `quantity` units (delta)
    Out(i32),
    /// Set the counter to this absolute value, not a delta
    Adjustment(i32),
}

impl StockOperation {
    /// Movement type this operation records
    pub fn movement_type(&self) -> MovementType {
        match self {
            StockOperation::In(_) => MovementType::In,
            StockOperation::Out(_) => MovementType::Out,
            StockOperation::Adjustment(_) => MovementType::Adjustment,
        }
    }

    /// Raw quantity carried by the operation (delta or absolute target)
    pub fn quantity(&self) -> i32 {
        match self {
            StockOperation::In(q) | StockOperation::Out(q) | StockOperation::Adjustment(q) => *q,
        }
    }
}

/// Stock movement - immutable audit record, created exactly once per
/// stock-affecting operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub movement_id: String,
    /// Product reference (non-owning; the product may be deleted later
    /// and the movement remains as an orphaned audit trail)
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub previous_stock: i32,
    pub new_stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Unix milliseconds
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_maps_to_movement_type() {
        assert_eq!(StockOperation::In(5).movement_type(), MovementType::In);
        assert_eq!(StockOperation::Out(3).movement_type(), MovementType::Out);
        assert_eq!(
            StockOperation::Adjustment(10).movement_type(),
            MovementType::Adjustment
        );
    }

    #[test]
    fn operation_serde_round_trip() {
        let json = serde_json::to_string(&StockOperation::Out(4)).unwrap();
        assert_eq!(json, "{\"type\":\"OUT\",\"quantity\":4}");
        let back: StockOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StockOperation::Out(4));
    }
}
