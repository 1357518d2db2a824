//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use crate::error::OrderError;
use rust_decimal::prelude::*;
use shared::order::OrderItemInput;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub(crate) fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two amounts for equality within MONEY_TOLERANCE
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

/// Line total for an item: unit_price * quantity, rounded to cents
pub fn line_total(quantity: i32, unit_price: f64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Order total: sum of line totals, rounded to cents
pub fn order_total(items: &[OrderItemInput]) -> f64 {
    let sum: Decimal = items
        .iter()
        .map(|item| to_decimal(item.unit_price) * Decimal::from(item.quantity))
        .sum();
    to_f64(sum)
}

/// Sum of ledger amounts in Decimal, for conservation checks
pub fn sum_payments(amounts: impl Iterator<Item = f64>) -> Decimal {
    amounts.map(to_decimal).sum()
}

/// Validate an order item before accepting it into an order
pub fn validate_item(
    item: &OrderItemInput,
    max_unit_price: f64,
    max_quantity: i32,
) -> Result<(), OrderError> {
    require_finite(item.unit_price, "unit_price")?;
    if item.unit_price < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "unit_price must be non-negative, got {}",
            item.unit_price
        )));
    }
    if item.unit_price > max_unit_price {
        return Err(OrderError::InvalidOperation(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            max_unit_price, item.unit_price
        )));
    }
    if item.name.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "item name must not be empty".to_string(),
        ));
    }
    if item.quantity <= 0 {
        return Err(OrderError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > max_quantity {
        return Err(OrderError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            max_quantity, item.quantity
        )));
    }
    Ok(())
}

/// Validate a payment amount before appending to the ledger
pub fn validate_payment_amount(amount: f64, max_amount: f64) -> Result<(), OrderError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    if amount > max_amount {
        return Err(OrderError::InvalidOperation(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            max_amount, amount
        )));
    }
    Ok(())
}
