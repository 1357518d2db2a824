//! Aggregate managers - serialized access and event broadcasting
//!
//! Each manager owns a concurrent registry of aggregates. A mutation
//! holds the aggregate's map entry for the whole read-modify-write, so
//! operations on the same order or product are serialized while
//! different aggregates proceed in parallel. Successful mutations are
//! broadcast on a loss-tolerant feed for notification collaborators;
//! persistence stays a caller concern.

mod error;
pub use error::*;

use crate::config::EngineConfig;
use crate::{installments, lifecycle, money, payments, stock};
use dashmap::DashMap;
use shared::models::{Product, StockMovement, StockOperation};
use shared::order::{
    EventPayload, InstallmentPlan, OrderEvent, OrderEventType, OrderItem, OrderItemInput,
    OrderSnapshot, OrderStatus, PaymentInput, PaymentRecord, StockEvent,
};
use shared::util::snowflake_id;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Draft for creating a service order
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_id: Option<String>,
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
}

/// One cart line of a sale deduction
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i32,
}

/// OrderManager - owns active service orders
pub struct OrderManager {
    config: EngineConfig,
    orders: DashMap<String, OrderSnapshot>,
    event_tx: broadcast::Sender<OrderEvent>,
    /// Per-day uniqueness comes from the date component of the number;
    /// the counter only disambiguates within the process lifetime.
    order_seq: AtomicU64,
}

impl std::fmt::Debug for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderManager")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl OrderManager {
    pub fn new(config: EngineConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            orders: DashMap::new(),
            event_tx,
            order_seq: AtomicU64::new(0),
        }
    }

    /// Subscribe to the order event feed
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Generate the next human-facing order number (OS<yyyymmdd><seq>)
    fn next_order_number(&self) -> String {
        let count = self.order_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let date_str = chrono::Utc::now().format("%Y%m%d").to_string();
        format!("{}{}{}", self.config.order_number_prefix, date_str, 10000 + count)
    }

    /// Create an order from a draft.
    ///
    /// Validates every item, computes line totals and the order total
    /// with decimal math, and freezes them on the snapshot.
    pub fn create_order(&self, draft: OrderDraft) -> ManagerResult<OrderSnapshot> {
        if draft.items.is_empty() {
            return Err(crate::error::OrderError::InvalidOperation(
                "order must have at least one item".to_string(),
            )
            .into());
        }
        if draft.customer_name.trim().is_empty() {
            return Err(crate::error::OrderError::InvalidOperation(
                "customer name must not be empty".to_string(),
            )
            .into());
        }
        for item in &draft.items {
            money::validate_item(item, self.config.max_unit_price, self.config.max_item_quantity)?;
        }

        let order_id = snowflake_id().to_string();
        let mut order = OrderSnapshot::new(
            order_id.clone(),
            self.next_order_number(),
            draft.customer_name,
        );
        order.customer_id = draft.customer_id;
        order.notes = draft.notes;
        order.items = draft
            .items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: money::line_total(item.quantity, item.unit_price),
                note: item.note.clone(),
            })
            .collect();
        order.total = money::order_total(&draft.items);
        // Derive payment_status from the frozen total; a zero-total
        // order (all-courtesy items) starts out settled.
        payments::recompute(&mut order);

        let event = OrderEvent::new(
            order_id.clone(),
            OrderEventType::OrderCreated,
            EventPayload::OrderCreated {
                order_number: order.order_number.clone(),
                customer_name: order.customer_name.clone(),
                total: order.total,
            },
        );
        tracing::info!(
            order_id = %order.order_id,
            order_number = %order.order_number,
            total = order.total,
            "order created"
        );
        self.orders.insert(order_id, order.clone());
        let _ = self.event_tx.send(event);
        Ok(order)
    }

    /// Get a snapshot of one order
    pub fn get_order(&self, order_id: &str) -> Option<OrderSnapshot> {
        self.orders.get(order_id).map(|entry| entry.clone())
    }

    /// Snapshots of all non-terminal orders
    pub fn active_orders(&self) -> Vec<OrderSnapshot> {
        self.orders
            .iter()
            .filter(|entry| !entry.is_terminal())
            .map(|entry| entry.clone())
            .collect()
    }

    /// Transition one order's production status.
    ///
    /// The map entry is held for the whole read-modify-write, so
    /// concurrent transitions on the same order serialize.
    pub fn transition_order(
        &self,
        order_id: &str,
        target: OrderStatus,
    ) -> ManagerResult<OrderSnapshot> {
        let (snapshot, event) = {
            let mut entry = self
                .orders
                .get_mut(order_id)
                .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
            let change = lifecycle::transition(&mut entry, target)?;
            let event = if target == OrderStatus::Cancelled {
                OrderEvent::new(
                    order_id.to_string(),
                    OrderEventType::OrderCancelled,
                    EventPayload::OrderCancelled {
                        from: change.from,
                        paid_amount: entry.paid_amount,
                    },
                )
            } else {
                OrderEvent::new(
                    order_id.to_string(),
                    OrderEventType::StatusChanged,
                    EventPayload::StatusChanged {
                        from: change.from,
                        to: change.to,
                    },
                )
            };
            (entry.clone(), event)
        };
        let _ = self.event_tx.send(event);
        Ok(snapshot)
    }

    /// Cancel an order (absorbing state; fails from terminal states)
    pub fn cancel_order(&self, order_id: &str) -> ManagerResult<OrderSnapshot> {
        self.transition_order(order_id, OrderStatus::Cancelled)
    }

    /// Record a payment against one order
    pub fn add_payment(
        &self,
        order_id: &str,
        input: &PaymentInput,
    ) -> ManagerResult<PaymentRecord> {
        let (record, event) = {
            let mut entry = self
                .orders
                .get_mut(order_id)
                .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
            let record =
                payments::add_payment(&mut entry, input, None, self.config.max_payment_amount)?;
            let event = OrderEvent::new(
                order_id.to_string(),
                OrderEventType::PaymentAdded,
                EventPayload::PaymentAdded {
                    payment_id: record.payment_id.clone(),
                    method: record.method,
                    amount: record.amount,
                    remaining: money::to_f64(payments::remaining_balance(&entry)),
                    payment_status: entry.payment_status,
                },
            );
            (record, event)
        };
        let _ = self.event_tx.send(event);
        Ok(record)
    }

    /// Plan installments over the order's current remaining balance and
    /// store the advisory schedule on the snapshot.
    pub fn plan_installments(
        &self,
        order_id: &str,
        count: u32,
        first_due: Option<chrono::NaiveDate>,
    ) -> ManagerResult<InstallmentPlan> {
        if count == 0 || count > self.config.max_installments {
            return Err(crate::error::OrderError::InvalidOperation(format!(
                "installment count must be between 1 and {}, got {}",
                self.config.max_installments, count
            ))
            .into());
        }
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
        if entry.is_terminal() {
            return Err(crate::error::OrderError::InvalidOperation(format!(
                "order {} is in a terminal state",
                order_id
            ))
            .into());
        }
        let plan = installments::plan(entry.remaining_amount(), count, first_due)?;
        entry.installment_plan = Some(plan.clone());
        entry.touch();
        Ok(plan)
    }
}

/// StockManager - owns products and their movement histories
pub struct StockManager {
    products: DashMap<String, Product>,
    /// Append-only movement log per product id; kept after product
    /// removal as an orphaned audit trail
    history: DashMap<String, Vec<StockMovement>>,
    event_tx: broadcast::Sender<StockEvent>,
}

impl Default for StockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockManager")
            .field("products", &self.products.len())
            .finish()
    }
}

impl StockManager {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            products: DashMap::new(),
            history: DashMap::new(),
            event_tx,
        }
    }

    /// Subscribe to the stock event feed
    pub fn subscribe(&self) -> broadcast::Receiver<StockEvent> {
        self.event_tx.subscribe()
    }

    /// Register a product; fails if the id is already taken
    pub fn add_product(&self, product: Product) -> ManagerResult<()> {
        match self.products.entry(product.id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(ManagerError::DuplicateProduct(product.id))
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(product);
                Ok(())
            }
        }
    }

    /// Get a snapshot of one product
    pub fn get_product(&self, product_id: &str) -> Option<Product> {
        self.products.get(product_id).map(|entry| entry.clone())
    }

    /// Remove a product from the registry.
    ///
    /// The movement history stays behind as an orphaned audit trail.
    pub fn remove_product(&self, product_id: &str) -> Option<Product> {
        self.products.remove(product_id).map(|(_, product)| product)
    }

    /// Movement history for a product, oldest first. Non-empty even
    /// after the product itself was removed.
    pub fn movement_history(&self, product_id: &str) -> Vec<StockMovement> {
        self.history
            .get(product_id)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Apply one stock operation to one product.
    ///
    /// The entry is held for the whole read-modify-write; concurrent
    /// movements on the same product serialize.
    pub fn record_movement(
        &self,
        product_id: &str,
        op: StockOperation,
        reason: Option<String>,
    ) -> ManagerResult<StockMovement> {
        let (movement, below_min_stock) = {
            let mut entry = self
                .products
                .get_mut(product_id)
                .ok_or_else(|| ManagerError::ProductNotFound(product_id.to_string()))?;
            let movement = stock::record_movement(&mut entry, op, reason)?;
            (movement, entry.is_below_min_stock())
        };
        self.history
            .entry(product_id.to_string())
            .or_default()
            .push(movement.clone());
        let _ = self.event_tx.send(StockEvent::MovementRecorded {
            movement: movement.clone(),
            below_min_stock,
        });
        Ok(movement)
    }

    /// Deduct stock for a sale, one `Out` movement per cart line.
    ///
    /// NOT atomic across lines: a failure at line k leaves lines
    /// 0..k already deducted. The error reports the applied movements
    /// and the failing line so the caller can compensate (opposite
    /// `In` movements) or mark the sale partially fulfilled.
    pub fn deduct_sale(
        &self,
        lines: &[SaleLine],
        reason: Option<String>,
    ) -> Result<Vec<StockMovement>, SaleDeductionError> {
        let mut applied = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            match self.record_movement(
                &line.product_id,
                StockOperation::Out(line.quantity),
                reason.clone(),
            ) {
                Ok(movement) => applied.push(movement),
                Err(source) => {
                    tracing::warn!(
                        failed_line = index,
                        product_id = %line.product_id,
                        applied = applied.len(),
                        error = %source,
                        "sale deduction aborted mid-batch"
                    );
                    return Err(SaleDeductionError {
                        applied,
                        failed_line: index,
                        source,
                    });
                }
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests;
