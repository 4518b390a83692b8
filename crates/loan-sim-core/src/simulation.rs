//! Loan simulation use cases shared by the HTTP service, the CLI and the
//! bindings.
//!
//! A [`SimulationRequest`] carries the raw, possibly incomplete figures a user
//! typed in (property value, down payment, term in years, annual rate in
//! percent). [`validate`] turns it into a [`ValidatedLoan`] or a typed
//! `InvalidInput` error; [`simulate`] and [`compare`] run the amortization
//! engine on the validated loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, AmortizationMethod, InstallmentRow, LoanParameters};
use crate::error::LoanSimError;
use crate::time_value::{effective_annual_rate, monthly_rate_from_annual_pct};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::LoanSimResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default upper bound on the number of monthly periods (50 years).
pub const DEFAULT_MAX_TERM_MONTHS: u32 = 600;

/// Terms longer than this get a warning (35 years).
const LONG_TERM_WARNING_MONTHS: u32 = 420;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Raw simulation request. Every field is optional so that a missing value
/// surfaces as a named validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    /// Property price.
    pub property_value: Option<Money>,
    /// Cash paid up front. Missing means no down payment.
    pub down_payment: Option<Money>,
    /// Loan term in whole years. Signed so that a negative term reaches
    /// validation instead of failing to parse.
    pub term_years: Option<i64>,
    /// Annual interest rate in percent (12 = 12% a year).
    pub annual_rate_pct: Option<Percent>,
    /// `"sac"` (any case) or anything else for Price. Missing means SAC.
    pub method: Option<String>,
}

/// Validation knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Accept a 0% annual rate. Off by default: the public simulator has
    /// always rejected it, although the engine handles it.
    pub allow_zero_rate: bool,
    /// Longest accepted term, in months.
    pub max_term_months: u32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            allow_zero_rate: false,
            max_term_months: DEFAULT_MAX_TERM_MONTHS,
        }
    }
}

/// A request that passed validation, with derived engine inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedLoan {
    pub property_value: Money,
    pub down_payment: Money,
    /// Property value minus down payment.
    pub financed_amount: Money,
    pub term_years: u32,
    pub term_months: u32,
    pub annual_rate_pct: Percent,
    pub monthly_rate: Rate,
    pub method: AmortizationMethod,
}

impl ValidatedLoan {
    /// Engine parameters for this loan under `method`.
    pub fn loan_parameters(&self, method: AmortizationMethod) -> LoanParameters {
        LoanParameters {
            principal: self.financed_amount,
            monthly_rate: self.monthly_rate,
            term_months: self.term_months,
            method,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Full simulation: request echo, summary and schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub property_value: Money,
    pub down_payment: Money,
    pub financed_amount: Money,
    pub term_years: u32,
    pub term_months: u32,
    pub annual_rate_pct: Percent,
    pub monthly_rate: Rate,
    /// `(1 + monthly_rate)^12 - 1`, to 6 decimal places.
    pub effective_annual_rate: Rate,
    pub method: AmortizationMethod,
    pub first_installment: Money,
    pub last_installment: Money,
    pub total_interest: Money,
    /// Financed amount plus total interest.
    pub total_cost: Money,
    pub schedule: Vec<InstallmentRow>,
}

/// SAC side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SacSummary {
    pub first_installment: Money,
    pub last_installment: Money,
    pub total_interest: Money,
    pub total_cost: Money,
}

/// Price side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub fixed_installment: Money,
    pub total_interest: Money,
    pub total_cost: Money,
}

/// Price minus SAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonDelta {
    pub interest: Money,
    pub total_cost: Money,
}

/// Both methods on identical terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub financed_amount: Money,
    pub sac: SacSummary,
    pub price: PriceSummary,
    pub difference: ComparisonDelta,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check a raw request and derive the engine inputs.
pub fn validate(
    request: &SimulationRequest,
    policy: &ValidationPolicy,
) -> LoanSimResult<ValidatedLoan> {
    let property_value = required(request.property_value, "property_value")?;
    let term_years = required(request.term_years, "term_years")?;
    let annual_rate_pct = required(request.annual_rate_pct, "annual_rate_pct")?;

    if property_value <= Decimal::ZERO {
        return Err(invalid("property_value", "Property value must be positive"));
    }
    if term_years <= 0 {
        return Err(invalid("term_years", "Term must be at least one year"));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(invalid("annual_rate_pct", "Interest rate cannot be negative"));
    }
    if annual_rate_pct.is_zero() && !policy.allow_zero_rate {
        return Err(invalid("annual_rate_pct", "Interest rate must be positive"));
    }

    let down_payment = request.down_payment.unwrap_or(Decimal::ZERO);
    if down_payment < Decimal::ZERO {
        return Err(invalid("down_payment", "Down payment cannot be negative"));
    }
    if down_payment >= property_value {
        return Err(invalid(
            "down_payment",
            "Down payment must be less than the property value",
        ));
    }

    let too_long = || {
        invalid(
            "term_years",
            &format!(
                "Term cannot exceed {} months ({} years)",
                policy.max_term_months,
                policy.max_term_months / MONTHS_PER_YEAR
            ),
        )
    };
    let term_years = u32::try_from(term_years).map_err(|_| too_long())?;
    let term_months = term_years
        .checked_mul(MONTHS_PER_YEAR)
        .filter(|m| *m <= policy.max_term_months)
        .ok_or_else(too_long)?;

    let method = request
        .method
        .as_deref()
        .map(AmortizationMethod::from_selector)
        .unwrap_or_default();

    Ok(ValidatedLoan {
        property_value,
        down_payment,
        financed_amount: property_value - down_payment,
        term_years,
        term_months,
        annual_rate_pct,
        monthly_rate: monthly_rate_from_annual_pct(annual_rate_pct),
        method,
    })
}

/// Validate the request and build the schedule under its selected method.
pub fn simulate(
    request: &SimulationRequest,
    policy: &ValidationPolicy,
) -> LoanSimResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let loan = validate(request, policy)?;
    let warnings = loan_warnings(&loan);

    let result = amortization::compute(&loan.loan_parameters(loan.method))?;

    let output = SimulationOutput {
        property_value: loan.property_value,
        down_payment: loan.down_payment,
        financed_amount: loan.financed_amount,
        term_years: loan.term_years,
        term_months: loan.term_months,
        annual_rate_pct: loan.annual_rate_pct,
        monthly_rate: loan.monthly_rate,
        effective_annual_rate: effective_annual_rate(loan.monthly_rate)?.round_dp(6),
        method: loan.method,
        first_installment: result.first_installment,
        last_installment: result.last_installment,
        total_interest: result.total_interest,
        total_cost: total_cost(&loan, result.total_interest)?,
        schedule: result.schedule,
    };

    let methodology = match loan.method {
        AmortizationMethod::Sac => "SAC (Constant Amortization)",
        AmortizationMethod::Price => "Price (French Fixed Installment)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, &loan, warnings, elapsed, output))
}

/// Validate the request and run both methods on it. The request's method
/// selector is ignored.
pub fn compare(
    request: &SimulationRequest,
    policy: &ValidationPolicy,
) -> LoanSimResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let loan = validate(request, policy)?;
    let warnings = loan_warnings(&loan);

    let sac = amortization::compute(&loan.loan_parameters(AmortizationMethod::Sac))?;
    let price = amortization::compute(&loan.loan_parameters(AmortizationMethod::Price))?;

    let sac_cost = total_cost(&loan, sac.total_interest)?;
    let price_cost = total_cost(&loan, price.total_interest)?;

    let output = ComparisonOutput {
        financed_amount: loan.financed_amount,
        sac: SacSummary {
            first_installment: sac.first_installment,
            last_installment: sac.last_installment,
            total_interest: sac.total_interest,
            total_cost: sac_cost,
        },
        price: PriceSummary {
            fixed_installment: price.first_installment,
            total_interest: price.total_interest,
            total_cost: price_cost,
        },
        difference: ComparisonDelta {
            interest: price.total_interest - sac.total_interest,
            total_cost: price_cost - sac_cost,
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SAC vs Price Comparison",
        &loan,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required<T>(value: Option<T>, field: &str) -> LoanSimResult<T> {
    value.ok_or_else(|| invalid(field, "Field is required"))
}

fn total_cost(loan: &ValidatedLoan, total_interest: Money) -> LoanSimResult<Money> {
    loan.financed_amount
        .checked_add(total_interest)
        .ok_or_else(|| LoanSimError::Overflow {
            context: "total cost".into(),
        })
}

fn invalid(field: &str, reason: &str) -> LoanSimError {
    LoanSimError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn loan_warnings(loan: &ValidatedLoan) -> Vec<String> {
    let mut warnings = Vec::new();
    if loan.monthly_rate.is_zero() {
        warnings.push("Zero interest rate: schedule is straight-line principal repayment".into());
    }
    if loan.term_months > LONG_TERM_WARNING_MONTHS {
        warnings.push(format!(
            "Term of {} months exceeds {} years",
            loan.term_months,
            LONG_TERM_WARNING_MONTHS / MONTHS_PER_YEAR
        ));
    }
    if loan.down_payment < loan.property_value * dec!(0.1) {
        warnings.push(format!(
            "Down payment covers {}% of the property value",
            (loan.down_payment / loan.property_value * dec!(100)).round_dp(1)
        ));
    }
    warnings
}
