use napi::Result as NapiResult;
use napi_derive::napi;

use loan_sim_core::amortization::{self, AmortizationMethod, LoanParameters};
use loan_sim_core::simulation::{self, SimulationRequest, ValidationPolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization engine
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct ScheduleBindingInput {
    principal: rust_decimal::Decimal,
    monthly_rate: rust_decimal::Decimal,
    term_months: u32,
}

fn schedule(input_json: &str, method: AmortizationMethod) -> NapiResult<String> {
    let input: ScheduleBindingInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let params = LoanParameters {
        principal: input.principal,
        monthly_rate: input.monthly_rate,
        term_months: input.term_months,
        method,
    };
    params.validate().map_err(to_napi_error)?;
    let output = amortization::compute(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortize_sac(input_json: String) -> NapiResult<String> {
    schedule(&input_json, AmortizationMethod::Sac)
}

#[napi]
pub fn amortize_price(input_json: String) -> NapiResult<String> {
    schedule(&input_json, AmortizationMethod::Price)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct SimulationBindingInput {
    #[serde(flatten)]
    request: SimulationRequest,
    #[serde(default)]
    policy: Option<ValidationPolicy>,
}

fn read_simulation(input_json: &str) -> NapiResult<(SimulationRequest, ValidationPolicy)> {
    let input: SimulationBindingInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    Ok((input.request, input.policy.unwrap_or_default()))
}

#[napi]
pub fn simulate_loan(input_json: String) -> NapiResult<String> {
    let (request, policy) = read_simulation(&input_json)?;
    let output = simulation::simulate(&request, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_methods(input_json: String) -> NapiResult<String> {
    let (request, policy) = read_simulation(&input_json)?;
    let output = simulation::compare(&request, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

