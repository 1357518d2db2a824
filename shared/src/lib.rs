//! Shared domain types for the Gráfica Express POS core
//!
//! Common types used across the workspace: the service-order aggregate,
//! payment ledger records, stock movement records, registry models and
//! id/time utilities.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{MovementType, Product, StockMovement, StockOperation};
pub use order::{
    InstallmentPlan, OrderItem, OrderItemInput, OrderSnapshot, OrderStatus, PaymentInput,
    PaymentMethod, PaymentRecord, PaymentStatus, ScheduledInstallment,
};
