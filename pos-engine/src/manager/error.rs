use crate::error::OrderError;
use shared::models::StockMovement;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ManagerError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    #[error(transparent)]
    Validation(#[from] OrderError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Failure report for a non-atomic batch deduction
///
/// Lines before `failed_line` are already deducted and stay deducted;
/// `applied` carries their movements so the caller can compensate with
/// equal-and-opposite `In` movements or flag the sale for an operator.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("sale deduction failed at line {failed_line}: {source}")]
pub struct SaleDeductionError {
    /// Movements applied before the failure, in line order
    pub applied: Vec<StockMovement>,
    /// Zero-based index of the line that failed
    pub failed_line: usize,
    pub source: ManagerError,
}
