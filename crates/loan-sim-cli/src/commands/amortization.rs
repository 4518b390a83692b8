use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use loan_sim_core::amortization::{self, AmortizationMethod, LoanParameters};
use loan_sim_core::with_metadata;

use crate::input;

/// Arguments for a raw engine schedule (SAC or Price)
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Monthly interest rate as a decimal (0.01 = 1% a month)
    #[arg(long)]
    pub monthly_rate: Option<Decimal>,

    /// Number of monthly periods
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScheduleInput {
    principal: Decimal,
    monthly_rate: Decimal,
    term_months: u32,
}

pub fn run_sac(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_schedule(args, AmortizationMethod::Sac)
}

pub fn run_price(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_schedule(args, AmortizationMethod::Price)
}

fn run_schedule(
    args: ScheduleArgs,
    method: AmortizationMethod,
) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = if args.input.is_none() && args.principal.is_none() {
        input::stdin::read_stdin()?
    } else {
        None
    };

    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            monthly_rate: args
                .monthly_rate
                .ok_or("--monthly-rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        }
    };

    let params = LoanParameters {
        principal: schedule_input.principal,
        monthly_rate: schedule_input.monthly_rate,
        term_months: schedule_input.term_months,
        method,
    };
    params.validate()?;

    let start = Instant::now();
    let result = amortization::compute(&params)?;
    let methodology = match method {
        AmortizationMethod::Sac => "SAC (Constant Amortization)",
        AmortizationMethod::Price => "Price (French Fixed Installment)",
    };
    let output = with_metadata(
        methodology,
        &params,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
