//! Order Lifecycle & Payment Ledger engine for Gráfica Express
//!
//! Three components, composed by the caller and never by each other:
//! - `lifecycle`: the production-status state machine
//! - `payments` / `installments`: the payment ledger and the advisory
//!   installment planner
//! - `stock`: the non-negative stock counter with an append-only
//!   movement log
//!
//! Every operation is a synchronous read-modify-write over a single
//! aggregate and returns a `Result`; callers serialize operations on
//! the same aggregate (the `manager` module does this with a concurrent
//! registry) and handle persistence and notification side effects.

pub mod config;
pub mod error;
pub mod installments;
pub mod lifecycle;
pub mod manager;
pub mod money;
pub mod payments;
pub mod stock;

pub use config::EngineConfig;
pub use error::{OrderError, OrderResult};
pub use lifecycle::{StatusChange, transition};
pub use manager::{
    ManagerError, ManagerResult, OrderDraft, OrderManager, SaleDeductionError, SaleLine,
    StockManager,
};
pub use payments::add_payment;
pub use stock::record_movement;
