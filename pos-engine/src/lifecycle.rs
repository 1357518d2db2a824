//! Production-status state machine
//!
//! Strict policy: forward one stage, back one stage, or cancel.
//! `transition` is the only way a status changes; on success exactly
//! two fields mutate (`status` and `updated_at`).

use crate::error::{OrderError, OrderResult};
use shared::order::{OrderSnapshot, OrderStatus};

/// Outcome of a successful transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Move an order to `target` if the edge exists in the transition table.
///
/// On failure the order is untouched. The caller owns persistence and
/// any notification/print side effects.
pub fn transition(order: &mut OrderSnapshot, target: OrderStatus) -> OrderResult<StatusChange> {
    let from = order.status;
    if !from.can_transition_to(target) {
        return Err(OrderError::InvalidTransition { from, to: target });
    }

    order.status = target;
    order.touch();
    tracing::info!(
        order_id = %order.order_id,
        from = %from,
        to = %target,
        "order status changed"
    );
    Ok(StatusChange { from, to: target })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> OrderSnapshot {
        let mut order = OrderSnapshot::new(
            "1".to_string(),
            "OS202601010001".to_string(),
            "Cliente Teste".to_string(),
        );
        order.total = 100.0;
        order
    }

    #[test]
    fn full_forward_path() {
        let mut order = pending_order();
        transition(&mut order, OrderStatus::Production).unwrap();
        transition(&mut order, OrderStatus::Finished).unwrap();
        let change = transition(&mut order, OrderStatus::Delivered).unwrap();
        assert_eq!(change.from, OrderStatus::Finished);
        assert_eq!(change.to, OrderStatus::Delivered);
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn pending_to_finished_directly_fails() {
        let mut order = pending_order();
        let err = transition(&mut order, OrderStatus::Finished).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Finished,
            }
        );
        // Order unchanged on failure
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn delivered_is_terminal() {
        let mut order = pending_order();
        transition(&mut order, OrderStatus::Production).unwrap();
        transition(&mut order, OrderStatus::Finished).unwrap();
        transition(&mut order, OrderStatus::Delivered).unwrap();

        for target in [
            OrderStatus::Pending,
            OrderStatus::Production,
            OrderStatus::Finished,
            OrderStatus::Cancelled,
        ] {
            assert!(transition(&mut order, target).is_err());
        }
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn cancelled_is_terminal() {
        let mut order = pending_order();
        transition(&mut order, OrderStatus::Cancelled).unwrap();
        for target in [
            OrderStatus::Pending,
            OrderStatus::Production,
            OrderStatus::Finished,
            OrderStatus::Delivered,
        ] {
            assert!(transition(&mut order, target).is_err());
        }
    }

    #[test]
    fn transition_touches_only_status_and_updated_at() {
        let mut order = pending_order();
        let before = order.clone();
        transition(&mut order, OrderStatus::Production).unwrap();

        assert_eq!(order.status, OrderStatus::Production);
        assert!(order.updated_at >= before.updated_at);
        // Everything else is untouched
        assert_eq!(order.order_id, before.order_id);
        assert_eq!(order.items, before.items);
        assert_eq!(order.payments, before.payments);
        assert_eq!(order.total, before.total);
        assert_eq!(order.paid_amount, before.paid_amount);
        assert_eq!(order.payment_status, before.payment_status);
        assert_eq!(order.created_at, before.created_at);
    }

    #[test]
    fn production_can_step_back_to_pending() {
        let mut order = pending_order();
        transition(&mut order, OrderStatus::Production).unwrap();
        transition(&mut order, OrderStatus::Pending).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
