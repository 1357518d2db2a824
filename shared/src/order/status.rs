//! Order statuses
//!
//! The production status follows a strict state machine: forward one
//! stage, back one stage, or cancel. `Delivered` and `Cancelled` are
//! terminal. The payment status is never set directly; it is derived
//! from the paid amount and the order total.

use serde::{Deserialize, Serialize};

/// Production status of a service order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, waiting for production
    #[default]
    Pending,
    /// In production
    Production,
    /// Produced, waiting for pickup/delivery
    Finished,
    /// Handed to the customer (terminal)
    Delivered,
    /// Cancelled (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Statuses reachable from `self` in a single transition.
    ///
    /// Forward one stage, back one stage, or cancel; terminal states
    /// have no outgoing edges.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Production, OrderStatus::Cancelled],
            OrderStatus::Production => &[
                OrderStatus::Finished,
                OrderStatus::Pending,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Finished => &[
                OrderStatus::Delivered,
                OrderStatus::Production,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Delivered => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Check if `target` is a legal single-step transition from `self`
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Production => write!(f, "PRODUCTION"),
            OrderStatus::Finished => write!(f, "FINISHED"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Payment status derived from `(paid_amount, total)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Nothing paid yet
    #[default]
    Pending,
    /// Some, but not all, of the total paid
    Partial,
    /// Fully paid
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Partial => write!(f, "PARTIAL"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}
