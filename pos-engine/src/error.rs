//! Engine-level validation errors
//!
//! All failures are deterministic validation rejections: the aggregate
//! is left untouched and retrying the same call yields the same result.

use shared::order::OrderStatus;
use thiserror::Error;

/// Validation errors returned by the engine operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("invalid payment amount")]
    InvalidAmount,

    #[error("payment exceeds remaining balance ({remaining:.2})")]
    ExceedsRemaining { remaining: f64 },

    #[error("invalid stock quantity")]
    InvalidQuantity,

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type OrderResult<T> = Result<T, OrderError>;
