//! SAC (Sistema de Amortização Constante): the principal portion is fixed at
//! `principal / term_months`, so installments fall as the balance declines.

use rust_decimal::Decimal;

use super::{checked, period_interest, AmortizationMethod, InstallmentRow, ScheduleResult};
use crate::types::{Money, Rate};
use crate::LoanSimResult;

/// Build a constant-amortization schedule.
///
/// Interest for each period accrues on the balance before that period's
/// payment. A zero-length term yields an empty schedule.
pub fn compute_sac(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanSimResult<ScheduleResult> {
    if term_months == 0 {
        return Ok(ScheduleResult::empty(AmortizationMethod::Sac));
    }

    let principal_portion = principal / Decimal::from(term_months);
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for period in 1..=term_months {
        let interest = period_interest(balance, monthly_rate)?;
        let installment = checked(principal_portion.checked_add(interest), "installment")?;
        balance -= principal_portion;
        total_interest = checked(total_interest.checked_add(interest), "total interest")?;

        schedule.push(InstallmentRow::record(
            period,
            installment,
            interest,
            principal_portion,
            balance,
        ));
    }

    ScheduleResult::from_rows(AmortizationMethod::Sac, schedule, total_interest)
}
