//! Price (French) system: one installment, computed up front with the annuity
//! formula, is paid every period. Early installments are mostly interest.

use rust_decimal::Decimal;

use super::{checked, period_interest, AmortizationMethod, InstallmentRow, ScheduleResult};
use crate::time_value::pmt;
use crate::types::{Money, Rate};
use crate::LoanSimResult;

/// Build a fixed-installment schedule.
///
/// The installment is `P * r(1+r)^n / ((1+r)^n - 1)`, or `P / n` when the
/// rate is zero. It is evaluated in discount form, `P * r / (1 - (1+r)^-n)`,
/// with an exact integer power in 28-digit decimal.
pub fn compute_price(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanSimResult<ScheduleResult> {
    if term_months == 0 {
        return Ok(ScheduleResult::empty(AmortizationMethod::Price));
    }

    let fixed_installment = fixed_installment(principal, monthly_rate, term_months)?;
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for period in 1..=term_months {
        let interest = period_interest(balance, monthly_rate)?;
        let principal_portion = fixed_installment - interest;
        balance -= principal_portion;
        total_interest = checked(total_interest.checked_add(interest), "total interest")?;

        schedule.push(InstallmentRow::record(
            period,
            fixed_installment,
            interest,
            principal_portion,
            balance,
        ));
    }

    ScheduleResult::from_rows(AmortizationMethod::Price, schedule, total_interest)
}

/// Unrounded level installment for a Price loan. `term_months` must be > 0.
pub fn fixed_installment(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanSimResult<Money> {
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }
    // pmt follows the borrower-negative sign convention
    Ok(-pmt(monthly_rate, term_months, principal, Decimal::ZERO)?)
}
