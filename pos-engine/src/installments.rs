//! Installment planning
//!
//! Pure helper: splits a remaining balance into 1..=12 monthly
//! installments. The plan is advisory schedule data; nothing is
//! appended to the ledger until each installment is actually collected
//! through `add_payment`.

use crate::error::{OrderError, OrderResult};
use crate::money;
use chrono::{Months, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::order::{InstallmentPlan, ScheduledInstallment};
use shared::util::now_millis;

/// Smallest representable installment (one cent)
const MIN_INSTALLMENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Plan `count` monthly installments over `remaining`.
///
/// Installments are equal cent-rounded parts; the last one absorbs the
/// rounding remainder so the plan sums exactly to `remaining`. Due
/// dates fall one calendar month apart starting the month after
/// `first_due` (defaults to today), with the day clamped to the target
/// month's length.
pub fn plan(
    remaining: f64,
    count: u32,
    first_due: Option<NaiveDate>,
) -> OrderResult<InstallmentPlan> {
    if count == 0 || count > 12 {
        return Err(OrderError::InvalidOperation(format!(
            "installment count must be between 1 and 12, got {}",
            count
        )));
    }
    money::validate_payment_amount(remaining, f64::MAX)?;

    let total = money::to_decimal(money::to_f64(money::to_decimal(remaining)));
    // Floor the equal part to whole cents; the positive remainder lands
    // on the last installment.
    let part = (total / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    if part < MIN_INSTALLMENT {
        return Err(OrderError::InvalidOperation(format!(
            "remaining balance {} is too small to split into {} installments",
            money::to_f64(total),
            count
        )));
    }

    let base = first_due.unwrap_or_else(|| Utc::now().date_naive());
    let mut installments = Vec::with_capacity(count as usize);
    let mut scheduled = Decimal::ZERO;
    for seq in 1..=count {
        // Last installment takes whatever the equal parts left over
        let amount = if seq == count {
            total - scheduled
        } else {
            part
        };
        scheduled += amount;
        installments.push(ScheduledInstallment {
            seq,
            due_date: due_date_for(base, seq),
            amount: money::to_f64(amount),
        });
    }

    Ok(InstallmentPlan {
        installment_count: count,
        installment_value: money::to_f64(part),
        planned_total: money::to_f64(total),
        installments,
        planned_at: now_millis(),
    })
}

/// Due date `months_ahead` calendar months after `base`, starting next
/// month; `Months::checked_add` clamps the day to the month's length
/// (Jan 31 + 1 month = Feb 28/29).
fn due_date_for(base: NaiveDate, months_ahead: u32) -> NaiveDate {
    base.checked_add_months(Months::new(months_ahead))
        .unwrap_or(base)
}
