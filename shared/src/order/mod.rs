//! Service Order Module
//!
//! Types for the order lifecycle and payment ledger:
//! - Statuses: production status state machine + derived payment status
//! - Types: order items, payment records, installment schedules
//! - Snapshot: the service-order aggregate
//! - Events: immutable facts emitted after successful mutations

pub mod event;
pub mod snapshot;
pub mod status;
pub mod types;

// Re-exports
pub use event::{EventPayload, OrderEvent, OrderEventType, StockEvent};
pub use snapshot::OrderSnapshot;
pub use status::{OrderStatus, PaymentStatus};
pub use types::*;
