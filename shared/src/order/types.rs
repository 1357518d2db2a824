//! Shared types for the service-order aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Items
// ============================================================================

/// Order item snapshot - fixed at order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product reference (String ID); None for one-off custom jobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Item description as shown on the service order
    pub name: String,
    /// Quantity
    pub quantity: i32,
    /// Price per unit
    pub unit_price: f64,
    /// Line total (computed: unit_price * quantity, rounded to cents)
    pub line_total: f64,
    /// Item note (finishing, paper weight, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Order item input - for creating orders (without computed fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Product reference (String ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Item description
    pub name: String,
    /// Quantity
    pub quantity: i32,
    /// Price per unit
    pub unit_price: f64,
    /// Item note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Payments
// ============================================================================

/// Payment method accepted at the counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Pix,
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "CASH"),
            PaymentMethod::Pix => write!(f, "PIX"),
            PaymentMethod::Card => write!(f, "CARD"),
        }
    }
}

/// Payment input for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    pub amount: f64,
    /// Which planned installment this payment settles, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_seq: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment record in the ledger - immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub method: PaymentMethod,
    pub amount: f64,
    /// Unix milliseconds
    pub paid_at: i64,
    /// Which planned installment this payment settles, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_seq: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Installment Planning
// ============================================================================

/// One planned installment - advisory schedule data, not a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledInstallment {
    /// 1-based position in the plan
    pub seq: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
}

/// Installment plan over the remaining balance at planning time
///
/// The plan is advisory: each installment is recorded through the
/// payment ledger when it is actually collected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallmentPlan {
    pub installment_count: u32,
    /// Per-installment value before remainder correction
    pub installment_value: f64,
    /// Balance the plan was computed over
    pub planned_total: f64,
    pub installments: Vec<ScheduledInstallment>,
    /// Unix milliseconds
    pub planned_at: i64,
}
