use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanSimError;
use crate::types::{Money, Percent, Rate};
use crate::LoanSimResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual rate quoted in percent into a monthly fraction.
///
/// `12` (12% a year) becomes `0.01`. Nominal division, no compounding.
pub fn monthly_rate_from_annual_pct(annual_pct: Percent) -> Rate {
    annual_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// `(1 + rate)^nper` by exact integer exponentiation.
pub fn compound_factor(rate: Rate, nper: u32) -> LoanSimResult<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powu(u64::from(nper)))
        .ok_or_else(|| LoanSimError::Overflow {
            context: format!("compound factor (1 + {rate})^{nper}"),
        })
}

/// `(1 + rate)^-nper`. Underflows towards zero instead of overflowing, so it
/// stays defined for any long, high-rate horizon.
pub fn discount_factor(rate: Rate, nper: u32) -> LoanSimResult<Decimal> {
    let base = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| LoanSimError::Overflow {
            context: format!("discount base 1 + {rate}"),
        })?;
    if base <= Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "rate".into(),
            reason: "Rate must be greater than -1".into(),
        });
    }
    (Decimal::ONE / base)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| LoanSimError::Overflow {
            context: format!("discount factor (1 + {rate})^-{nper}"),
        })
}

/// Present Value
pub fn pv(rate: Rate, nper: u32, pmt: Money, fv: Money) -> LoanSimResult<Money> {
    if rate.is_zero() {
        return Ok(-(pmt * Decimal::from(nper) + fv));
    }

    let factor = compound_factor(rate, nper)?;

    if factor.is_zero() {
        return Err(LoanSimError::DivisionByZero {
            context: "PV factor".into(),
        });
    }

    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / rate;
    Ok(-(pmt * annuity_factor + fv / factor))
}

/// Payment (PMT)
///
/// Spreadsheet sign convention: borrowing a positive `present_value` yields a
/// negative payment. Evaluated as `(pv + fv·v^n)·r / (1 - v^n)` with
/// `v = 1 / (1 + r)`, which tends to `pv·r` as `n` grows instead of
/// overflowing.
pub fn pmt(
    rate: Rate,
    nper: u32,
    present_value: Money,
    future_value: Money,
) -> LoanSimResult<Money> {
    if nper == 0 {
        return Err(LoanSimError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let discount = discount_factor(rate, nper)?;
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(LoanSimError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let overflow = || LoanSimError::Overflow {
        context: format!("PMT on {present_value} at {rate} over {nper} periods"),
    };
    let numerator = future_value
        .checked_mul(discount)
        .and_then(|fv| present_value.checked_add(fv))
        .and_then(|total| total.checked_mul(rate))
        .ok_or_else(overflow)?;

    numerator
        .checked_div(denominator)
        .map(|payment| -payment)
        .ok_or_else(overflow)
}

/// Effective annual rate implied by a monthly rate: `(1 + r)^12 - 1`.
pub fn effective_annual_rate(monthly_rate: Rate) -> LoanSimResult<Rate> {
    Ok(compound_factor(monthly_rate, MONTHS_PER_YEAR)? - Decimal::ONE)
}
