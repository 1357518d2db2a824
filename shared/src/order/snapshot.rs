//! Service-order aggregate
//!
//! The snapshot owns its `items` and `payments` sequences. Derived
//! money fields (`paid_amount`, `payment_status`) are only ever written
//! by the engine's recompute path; `compute_payment_status` is the
//! single source of truth for the derivation rule.

use super::status::{OrderStatus, PaymentStatus};
use super::types::{InstallmentPlan, OrderItem, PaymentRecord};
use crate::util::now_millis;
use serde::{Deserialize, Serialize};

/// Service order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Order ID (assigned at creation, immutable)
    pub order_id: String,
    /// Human-facing service-order number (e.g. OS2026082610001)
    pub order_number: String,
    /// Customer name snapshot
    pub customer_name: String,
    /// Customer registry reference (non-owning)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Production status
    pub status: OrderStatus,
    /// Items in the order (fixed at creation)
    pub items: Vec<OrderItem>,
    /// Payment ledger (append-only)
    pub payments: Vec<PaymentRecord>,
    /// Order total (sum of line totals, fixed at creation)
    pub total: f64,
    /// Amount paid - equals the sum of ledger amounts at all times
    #[serde(default)]
    pub paid_amount: f64,
    /// Derived from (paid_amount, total); never set independently
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Advisory installment schedule, if one was planned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_plan: Option<InstallmentPlan>,
    /// Free-form order note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    /// Last update timestamp - bumped on every successful mutation
    pub updated_at: i64,
}

impl OrderSnapshot {
    /// Create a new order shell; items and total are filled by the engine
    pub fn new(order_id: String, order_number: String, customer_name: String) -> Self {
        let now = now_millis();
        Self {
            order_id,
            order_number,
            customer_name,
            customer_id: None,
            status: OrderStatus::Pending,
            items: Vec::new(),
            payments: Vec::new(),
            total: 0.0,
            paid_amount: 0.0,
            payment_status: PaymentStatus::Pending,
            installment_plan: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Outstanding balance, never negative
    pub fn remaining_amount(&self) -> f64 {
        (self.total - self.paid_amount).max(0.0)
    }

    /// Derive the payment status from `(paid_amount, total)`
    ///
    /// A zero-total order counts as paid: there is nothing to collect.
    pub fn compute_payment_status(&self) -> PaymentStatus {
        if self.remaining_amount() == 0.0 {
            PaymentStatus::Paid
        } else if self.paid_amount > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }

    /// Check if fully paid
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.total
    }

    /// Check if the order is in a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check if the order was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Bump `updated_at` to now; called after every successful mutation
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}
