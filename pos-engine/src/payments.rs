//! Payment ledger
//!
//! Appends payments against an order's total and keeps the derived
//! fields consistent: `paid_amount` is always the decimal sum of the
//! ledger, `payment_status` is always recomputed from it. Entries are
//! immutable once appended; refunds/reversals are out of scope.

use crate::error::{OrderError, OrderResult};
use crate::money;
use rust_decimal::Decimal;
use shared::order::{OrderSnapshot, PaymentInput, PaymentRecord, PaymentStatus};
use shared::util::now_millis;

/// Remaining balance rebuilt in decimal from the cent-rounded stored
/// values. The raw f64 subtraction in `remaining_amount` carries
/// binary noise (130.00 - 129.99), so every surface that compares or
/// exposes the balance goes through this instead.
pub fn remaining_balance(order: &OrderSnapshot) -> Decimal {
    (money::to_decimal(order.total) - money::to_decimal(order.paid_amount)).max(Decimal::ZERO)
}

/// Append a payment to the order's ledger.
///
/// `paid_at` defaults to now. Fails without mutation when the amount is
/// non-positive, exceeds the remaining balance, breaches `max_amount`,
/// or the order is in a terminal state that takes no further money.
/// Not idempotent: each call appends a new entry; retry dedup is a
/// caller concern.
pub fn add_payment(
    order: &mut OrderSnapshot,
    input: &PaymentInput,
    paid_at: Option<i64>,
    max_amount: f64,
) -> OrderResult<PaymentRecord> {
    money::validate_payment_amount(input.amount, max_amount)?;

    if order.is_cancelled() {
        return Err(OrderError::InvalidOperation(format!(
            "order {} is cancelled and takes no payments",
            order.order_id
        )));
    }
    if order.is_fully_paid() {
        return Err(OrderError::ExceedsRemaining { remaining: 0.0 });
    }

    // Amounts enter the ledger cent-rounded; all comparisons are exact
    // decimal comparisons over cent values.
    let amount = money::to_decimal(money::to_f64(money::to_decimal(input.amount)));
    if amount <= Decimal::ZERO {
        // Sub-cent amounts round to zero and never enter the ledger
        return Err(OrderError::InvalidAmount);
    }
    let remaining = remaining_balance(order);
    if amount > remaining {
        return Err(OrderError::ExceedsRemaining {
            remaining: money::to_f64(remaining),
        });
    }

    let record = PaymentRecord {
        payment_id: uuid::Uuid::new_v4().to_string(),
        method: input.method,
        amount: money::to_f64(amount),
        paid_at: paid_at.unwrap_or_else(now_millis),
        installment_seq: input.installment_seq,
        note: input.note.clone(),
    };
    order.payments.push(record.clone());
    recompute(order);
    order.touch();

    tracing::info!(
        order_id = %order.order_id,
        method = %record.method,
        amount = record.amount,
        remaining = money::to_f64(remaining_balance(order)),
        payment_status = %order.payment_status,
        "payment recorded"
    );
    Ok(record)
}

/// Recompute `paid_amount` and `payment_status` from the ledger.
///
/// `paid_amount` is the decimal sum of all entries. Ledger amounts are
/// cent-rounded on entry, so the sum and the comparison against the
/// total are exact.
pub fn recompute(order: &mut OrderSnapshot) {
    let paid = money::sum_payments(order.payments.iter().map(|p| p.amount));
    order.paid_amount = money::to_f64(paid);

    let total = money::to_decimal(order.total);
    order.payment_status = if paid >= total {
        PaymentStatus::Paid
    } else if paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::PaymentMethod;

    const MAX: f64 = 1_000_000.0;

    fn order_with_total(total: f64) -> OrderSnapshot {
        let mut order = OrderSnapshot::new(
            "1".to_string(),
            "OS202601010001".to_string(),
            "Cliente Teste".to_string(),
        );
        order.total = total;
        order
    }

    fn cash(amount: f64) -> PaymentInput {
        PaymentInput {
            method: PaymentMethod::Cash,
            amount,
            installment_seq: None,
            note: None,
        }
    }

    #[test]
    fn partial_then_full_payment() {
        let mut order = order_with_total(130.0);

        add_payment(&mut order, &cash(50.0), None, MAX).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Partial);
        assert_eq!(order.paid_amount, 50.0);
        assert_eq!(order.remaining_amount(), 80.0);

        let pix = PaymentInput {
            method: PaymentMethod::Pix,
            amount: 80.0,
            installment_seq: None,
            note: None,
        };
        add_payment(&mut order, &pix, None, MAX).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.remaining_amount(), 0.0);
        assert_eq!(order.payments.len(), 2);
    }

    #[test]
    fn overpayment_fails_without_mutation() {
        let mut order = order_with_total(100.0);
        let err = add_payment(&mut order, &cash(150.0), None, MAX).unwrap_err();
        assert_eq!(err, OrderError::ExceedsRemaining { remaining: 100.0 });
        assert_eq!(order.paid_amount, 0.0);
        assert!(order.payments.is_empty());
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn non_positive_amounts_rejected() {
        let mut order = order_with_total(100.0);
        assert_eq!(
            add_payment(&mut order, &cash(0.0), None, MAX),
            Err(OrderError::InvalidAmount)
        );
        assert_eq!(
            add_payment(&mut order, &cash(-10.0), None, MAX),
            Err(OrderError::InvalidAmount)
        );
        assert!(order.payments.is_empty());
    }

    #[test]
    fn paid_amount_equals_ledger_sum_after_any_sequence() {
        let mut order = order_with_total(100.0);
        for amount in [10.0, 25.5, 14.5, 50.0] {
            add_payment(&mut order, &cash(amount), None, MAX).unwrap();
            let ledger_sum: f64 = order.payments.iter().map(|p| p.amount).sum();
            assert!(money::money_eq(order.paid_amount, ledger_sum));
            assert!(order.paid_amount <= order.total);
            assert_eq!(order.payment_status, order.compute_payment_status());
        }
        assert_eq!(order.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn settled_order_takes_no_more_money() {
        let mut order = order_with_total(50.0);
        add_payment(&mut order, &cash(50.0), None, MAX).unwrap();
        let err = add_payment(&mut order, &cash(0.01), None, MAX).unwrap_err();
        assert_eq!(err, OrderError::ExceedsRemaining { remaining: 0.0 });
    }

    #[test]
    fn cancelled_order_takes_no_money() {
        let mut order = order_with_total(50.0);
        crate::lifecycle::transition(&mut order, shared::order::OrderStatus::Cancelled).unwrap();
        assert!(matches!(
            add_payment(&mut order, &cash(10.0), None, MAX),
            Err(OrderError::InvalidOperation(_))
        ));
    }

    #[test]
    fn float_hostile_installments_settle_exactly() {
        // 3 x 33.33 + 0.01 remainder on a 100.00 order
        let mut order = order_with_total(100.0);
        add_payment(&mut order, &cash(33.33), None, MAX).unwrap();
        add_payment(&mut order, &cash(33.33), None, MAX).unwrap();
        add_payment(&mut order, &cash(33.34), None, MAX).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.remaining_amount(), 0.0);
    }

    #[test]
    fn amount_above_configured_maximum_rejected() {
        let mut order = order_with_total(100.0);
        assert!(matches!(
            add_payment(&mut order, &cash(60.0), None, 50.0),
            Err(OrderError::InvalidOperation(_))
        ));
    }
}
