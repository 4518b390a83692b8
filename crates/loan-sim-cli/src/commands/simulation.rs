use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_sim_core::simulation::{self, SimulationRequest, ValidationPolicy, DEFAULT_MAX_TERM_MONTHS};

use crate::input;

/// Loan terms shared by `simulate` and `compare`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment (defaults to zero)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "years", allow_negative_numbers = true)]
    pub term_years: Option<i64>,

    /// Annual interest rate in percent (12 = 12% a year)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Accept a 0% interest rate
    #[arg(long)]
    pub allow_zero_rate: bool,

    /// Longest accepted term in months
    #[arg(long, default_value_t = DEFAULT_MAX_TERM_MONTHS)]
    pub max_term_months: u32,
}

/// Arguments for a single-method simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Amortization system: sac or price
    #[arg(long, default_value = "sac")]
    pub method: String,
}

/// Arguments for a SAC vs Price comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = policy_from(&args.loan);
    let mut request = read_request(&args.loan)?;
    if request.method.is_none() {
        request.method = Some(args.method);
    }
    let result = simulation::simulate(&request, &policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = policy_from(&args.loan);
    let request = read_request(&args.loan)?;
    let result = simulation::compare(&request, &policy)?;
    Ok(serde_json::to_value(result)?)
}

fn policy_from(args: &LoanArgs) -> ValidationPolicy {
    ValidationPolicy {
        allow_zero_rate: args.allow_zero_rate,
        max_term_months: args.max_term_months,
    }
}

/// File or stdin input wins over flags; missing flags are reported by
/// validation with the field name.
fn read_request(args: &LoanArgs) -> Result<SimulationRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if args.property_value.is_none() {
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }
    }
    Ok(SimulationRequest {
        property_value: args.property_value,
        down_payment: args.down_payment,
        term_years: args.term_years,
        annual_rate_pct: args.annual_rate,
        method: None,
    })
}
