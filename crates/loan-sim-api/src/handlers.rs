use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use loan_sim_core::simulation::{self, SimulationRequest, ValidationPolicy};

use crate::dto::{ComparisonResponse, LoanRequestBody, SimulationResponse};
use crate::{error::ApiError, Result};

pub type PolicyState = Arc<ValidationPolicy>;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/simular
/// Full schedule under the requested amortization system
pub async fn simulate(
    State(policy): State<PolicyState>,
    payload: std::result::Result<Json<LoanRequestBody>, JsonRejection>,
) -> Result<Json<SimulationResponse>> {
    let request = read_body(payload)?;

    let output = simulation::simulate(&request, &policy).map_err(reject)?;
    let result = &output.result;
    tracing::debug!(
        method = %result.method,
        financed = %result.financed_amount,
        months = result.term_months,
        first_installment = %result.first_installment,
        "simulation computed"
    );
    for warning in &output.warnings {
        tracing::info!(%warning, "simulation warning");
    }

    let response = SimulationResponse::from(result).echo_selector(request.method.as_deref());
    Ok(Json(response))
}

/// POST /api/comparar
/// SAC and Price side by side for the same loan
pub async fn compare(
    State(policy): State<PolicyState>,
    payload: std::result::Result<Json<LoanRequestBody>, JsonRejection>,
) -> Result<Json<ComparisonResponse>> {
    let request = read_body(payload)?;

    let output = simulation::compare(&request, &policy).map_err(reject)?;
    tracing::debug!(
        financed = %output.result.financed_amount,
        interest_delta = %output.result.difference.interest,
        "comparison computed"
    );

    Ok(Json(ComparisonResponse::from(&output.result)))
}

fn read_body(
    payload: std::result::Result<Json<LoanRequestBody>, JsonRejection>,
) -> Result<SimulationRequest> {
    match payload {
        Ok(Json(body)) => Ok(body.into()),
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "unreadable request body");
            Err(rejection.into())
        }
    }
}

fn reject(err: loan_sim_core::LoanSimError) -> ApiError {
    if err.is_invalid_input() {
        tracing::warn!(error = %err, "request rejected");
    } else {
        tracing::error!(error = %err, "computation failed");
    }
    err.into()
}
