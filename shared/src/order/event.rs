//! Order and stock events - immutable facts emitted after successful mutations
//!
//! Notification collaborators (WhatsApp templates, dashboards, printers)
//! observe these; the core never calls them directly.

use super::status::{OrderStatus, PaymentStatus};
use super::types::PaymentMethod;
use crate::models::StockMovement;
use serde::{Deserialize, Serialize};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Order this event belongs to
    pub order_id: String,
    /// Unix milliseconds, set when the event is created
    pub timestamp: i64,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    OrderCreated,
    StatusChanged,
    PaymentAdded,
    OrderCancelled,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderCreated => write!(f, "ORDER_CREATED"),
            OrderEventType::StatusChanged => write!(f, "STATUS_CHANGED"),
            OrderEventType::PaymentAdded => write!(f, "PAYMENT_ADDED"),
            OrderEventType::OrderCancelled => write!(f, "ORDER_CANCELLED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    OrderCreated {
        order_number: String,
        customer_name: String,
        total: f64,
    },

    StatusChanged {
        from: OrderStatus,
        to: OrderStatus,
    },

    PaymentAdded {
        payment_id: String,
        method: PaymentMethod,
        amount: f64,
        /// Balance left after this payment
        remaining: f64,
        payment_status: PaymentStatus,
    },

    OrderCancelled {
        /// Status the order held before cancellation
        from: OrderStatus,
        /// Amount already collected when the order was cancelled
        paid_amount: f64,
    },
}

impl OrderEvent {
    /// Create a new event with a fresh id and server timestamp
    pub fn new(order_id: String, event_type: OrderEventType, payload: EventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            order_id,
            timestamp: crate::util::now_millis(),
            event_type,
            payload,
        }
    }
}

/// Stock event - emitted once per recorded movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockEvent {
    MovementRecorded {
        movement: StockMovement,
        /// True when the movement left the product at or below its
        /// minimum stock level
        below_min_stock: bool,
    },
}
