//! Loan amortization engine: SAC (constant amortization) and Price (French,
//! fixed installment) schedules.
//!
//! Every schedule is materialised month by month. Interest and principal are
//! accumulated unrounded; each recorded row is rounded to cents. All math in
//! `rust_decimal::Decimal`.

pub mod price;
pub mod sac;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LoanSimError;
use crate::types::{round_money, Money, Rate};
use crate::LoanSimResult;

pub use price::compute_price;
pub use sac::compute_sac;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Amortization method selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationMethod {
    /// Constant principal portion; installments decline over time.
    #[default]
    Sac,
    /// Constant installment; the interest/principal split shifts over time.
    Price,
}

impl AmortizationMethod {
    /// Parse a user-facing selector. Case-insensitive: `"sac"` selects SAC,
    /// any other value selects Price.
    pub fn from_selector(selector: &str) -> Self {
        if selector.trim().eq_ignore_ascii_case("sac") {
            AmortizationMethod::Sac
        } else {
            AmortizationMethod::Price
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationMethod::Sac => "sac",
            AmortizationMethod::Price => "price",
        }
    }
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated loan terms handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount financed (property value minus down payment).
    pub principal: Money,
    /// Periodic interest rate as a fraction (0.01 = 1% a month).
    pub monthly_rate: Rate,
    /// Number of monthly periods.
    pub term_months: u32,
    pub method: AmortizationMethod,
}

impl LoanParameters {
    /// Reject terms the engine would not model. [`compute`] itself trusts its
    /// caller; front ends taking raw engine inputs run this first.
    pub fn validate(&self) -> LoanSimResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(invalid_parameter("principal", "Principal must be positive"));
        }
        if self.monthly_rate < Decimal::ZERO {
            return Err(invalid_parameter("monthly_rate", "Monthly rate cannot be negative"));
        }
        if self.term_months == 0 {
            return Err(invalid_parameter("term_months", "Term must be at least one month"));
        }
        Ok(())
    }
}

fn invalid_parameter(field: &str, reason: &str) -> LoanSimError {
    LoanSimError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One period of an amortization schedule. Amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRow {
    /// 1-based period number.
    pub period: u32,
    /// Total paid this period.
    pub installment: Money,
    /// Interest portion of the installment.
    pub interest: Money,
    /// Principal portion of the installment.
    pub principal_paid: Money,
    /// Outstanding balance after this period's payment, floored at zero.
    pub remaining_balance: Money,
}

impl InstallmentRow {
    fn record(
        period: u32,
        installment: Money,
        interest: Money,
        principal_paid: Money,
        balance: Money,
    ) -> Self {
        InstallmentRow {
            period,
            installment: round_money(installment),
            interest: round_money(interest),
            principal_paid: round_money(principal_paid),
            remaining_balance: round_money(balance.max(Decimal::ZERO)),
        }
    }
}

/// Full amortization schedule plus summary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub method: AmortizationMethod,
    /// Rows ordered by period, ascending.
    pub schedule: Vec<InstallmentRow>,
    /// Sum of unrounded interest, rounded once.
    pub total_interest: Money,
    /// Sum of the recorded installments.
    pub total_paid: Money,
    pub first_installment: Money,
    pub last_installment: Money,
}

impl ScheduleResult {
    fn from_rows(
        method: AmortizationMethod,
        schedule: Vec<InstallmentRow>,
        total_interest: Money,
    ) -> LoanSimResult<Self> {
        let first_installment = schedule.first().map(|r| r.installment).unwrap_or_default();
        let last_installment = schedule.last().map(|r| r.installment).unwrap_or_default();
        let total_paid = schedule.iter().try_fold(Decimal::ZERO, |acc, r| {
            checked(acc.checked_add(r.installment), "total paid")
        })?;

        Ok(ScheduleResult {
            method,
            schedule,
            total_interest: round_money(total_interest),
            total_paid,
            first_installment,
            last_installment,
        })
    }

    fn empty(method: AmortizationMethod) -> Self {
        ScheduleResult {
            method,
            schedule: Vec::new(),
            total_interest: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            first_installment: Decimal::ZERO,
            last_installment: Decimal::ZERO,
        }
    }

    /// Balance left after the final period (zero for a complete schedule).
    pub fn final_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|r| r.remaining_balance)
            .unwrap_or_default()
    }
}

/// Interest accrued on `balance` for one period.
fn period_interest(balance: Money, monthly_rate: Rate) -> LoanSimResult<Money> {
    checked(balance.checked_mul(monthly_rate), "period interest")
}

fn checked(value: Option<Decimal>, context: &str) -> LoanSimResult<Decimal> {
    value.ok_or_else(|| LoanSimError::Overflow {
        context: context.into(),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the schedule for `params` under its selected method.
pub fn compute(params: &LoanParameters) -> LoanSimResult<ScheduleResult> {
    match params.method {
        AmortizationMethod::Sac => {
            compute_sac(params.principal, params.monthly_rate, params.term_months)
        }
        AmortizationMethod::Price => {
            compute_price(params.principal, params.monthly_rate, params.term_months)
        }
    }
}
