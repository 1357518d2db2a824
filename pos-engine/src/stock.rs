//! Stock ledger
//!
//! Keeps a non-negative integer counter per product and returns an
//! immutable movement snapshot for every successful operation. `In` and
//! `Out` are deltas; `Adjustment` sets the counter to an absolute
//! value.

use crate::error::{OrderError, OrderResult};
use shared::models::{Product, StockMovement, StockOperation};
use shared::util::now_millis;

/// Apply a stock operation to a product.
///
/// Fails without mutation on negative quantities and on `Out`
/// operations exceeding the available stock. On success the product
/// counter is updated and the movement snapshot is returned; appending
/// it to the history is the caller's (or manager's) job.
pub fn record_movement(
    product: &mut Product,
    op: StockOperation,
    reason: Option<String>,
) -> OrderResult<StockMovement> {
    if op.quantity() < 0 {
        return Err(OrderError::InvalidQuantity);
    }

    let previous_stock = product.stock;
    let new_stock = match op {
        StockOperation::In(quantity) => {
            previous_stock
                .checked_add(quantity)
                .ok_or(OrderError::InvalidQuantity)?
        }
        StockOperation::Out(quantity) => {
            if quantity > previous_stock {
                return Err(OrderError::InsufficientStock {
                    available: previous_stock,
                    requested: quantity,
                });
            }
            previous_stock - quantity
        }
        StockOperation::Adjustment(target) => target,
    };

    product.stock = new_stock;
    product.updated_at = now_millis();

    let movement = StockMovement {
        movement_id: uuid::Uuid::new_v4().to_string(),
        product_id: product.id.clone(),
        movement_type: op.movement_type(),
        quantity: op.quantity(),
        previous_stock,
        new_stock,
        reason,
        created_at: product.updated_at,
    };
    tracing::debug!(
        product_id = %movement.product_id,
        movement_type = %movement.movement_type,
        quantity = movement.quantity,
        previous_stock,
        new_stock,
        "stock movement recorded"
    );
    Ok(movement)
}

/// Re-apply a movement's `(type, quantity)` to a running counter.
///
/// Used to replay a product's history from zero and check it against
/// the recorded `new_stock` values.
pub fn replay_step(stock: i32, movement: &StockMovement) -> i32 {
    match movement.movement_type {
        shared::models::MovementType::In => stock + movement.quantity,
        shared::models::MovementType::Out => stock - movement.quantity,
        shared::models::MovementType::Adjustment => movement.quantity,
    }
}
