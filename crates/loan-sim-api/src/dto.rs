//! Wire types for the public simulator API.
//!
//! Field names are the ones existing front ends already send and read
//! (`valorImovel`, `prazoAnos`, `tabela`, ...). Money goes out as JSON
//! numbers; incoming numbers may be JSON numbers or numeric strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loan_sim_core::amortization::InstallmentRow;
use loan_sim_core::simulation::{ComparisonOutput, SimulationOutput, SimulationRequest};

/// Body of both `simular` and `comparar`. Missing fields are left to
/// validation, which names them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoanRequestBody {
    #[serde(rename = "valorImovel")]
    pub property_value: Option<Decimal>,
    #[serde(rename = "valorEntrada")]
    pub down_payment: Option<Decimal>,
    #[serde(rename = "prazoAnos")]
    pub term_years: Option<i64>,
    /// Annual rate in percent.
    #[serde(rename = "taxaJuros")]
    pub annual_rate_pct: Option<Decimal>,
    #[serde(rename = "sistemaAmortizacao")]
    pub method: Option<String>,
}

impl From<LoanRequestBody> for SimulationRequest {
    fn from(body: LoanRequestBody) -> Self {
        SimulationRequest {
            property_value: body.property_value,
            down_payment: body.down_payment,
            term_years: body.term_years,
            annual_rate_pct: body.annual_rate_pct,
            method: body.method,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRowBody {
    #[serde(rename = "mes")]
    pub period: u32,
    #[serde(rename = "parcela", with = "rust_decimal::serde::float")]
    pub installment: Decimal,
    #[serde(rename = "juros", with = "rust_decimal::serde::float")]
    pub interest: Decimal,
    #[serde(rename = "amortizacao", with = "rust_decimal::serde::float")]
    pub principal_paid: Decimal,
    #[serde(rename = "saldoDevedor", with = "rust_decimal::serde::float")]
    pub remaining_balance: Decimal,
}

impl From<&InstallmentRow> for ScheduleRowBody {
    fn from(row: &InstallmentRow) -> Self {
        ScheduleRowBody {
            period: row.period,
            installment: row.installment,
            interest: row.interest,
            principal_paid: row.principal_paid,
            remaining_balance: row.remaining_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    #[serde(rename = "valorImovel", with = "rust_decimal::serde::float")]
    pub property_value: Decimal,
    #[serde(rename = "valorEntrada", with = "rust_decimal::serde::float")]
    pub down_payment: Decimal,
    #[serde(rename = "valorFinanciado", with = "rust_decimal::serde::float")]
    pub financed_amount: Decimal,
    #[serde(rename = "prazoAnos")]
    pub term_years: u32,
    #[serde(rename = "prazoMeses")]
    pub term_months: u32,
    #[serde(rename = "taxaJuros", with = "rust_decimal::serde::float")]
    pub annual_rate_pct: Decimal,
    #[serde(rename = "taxaEfetivaAnual", with = "rust_decimal::serde::float")]
    pub effective_annual_rate: Decimal,
    #[serde(rename = "sistemaAmortizacao")]
    pub method: String,
    #[serde(rename = "primeiraParcela", with = "rust_decimal::serde::float")]
    pub first_installment: Decimal,
    #[serde(rename = "ultimaParcela", with = "rust_decimal::serde::float")]
    pub last_installment: Decimal,
    #[serde(rename = "totalJuros", with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(rename = "custoTotal", with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(rename = "tabela")]
    pub schedule: Vec<ScheduleRowBody>,
}

impl SimulationResponse {
    /// Echo the caller's selector, lowercased, in place of the canonical
    /// method name. Any non-SAC selector is computed as Price but echoed as
    /// sent (`"Frances"` comes back as `"frances"`).
    pub fn echo_selector(mut self, selector: Option<&str>) -> Self {
        if let Some(selector) = selector {
            self.method = selector.to_lowercase();
        }
        self
    }
}

impl From<&SimulationOutput> for SimulationResponse {
    fn from(out: &SimulationOutput) -> Self {
        SimulationResponse {
            property_value: out.property_value,
            down_payment: out.down_payment,
            financed_amount: out.financed_amount,
            term_years: out.term_years,
            term_months: out.term_months,
            annual_rate_pct: out.annual_rate_pct,
            effective_annual_rate: out.effective_annual_rate,
            method: out.method.to_string(),
            first_installment: out.first_installment,
            last_installment: out.last_installment,
            total_interest: out.total_interest,
            total_cost: out.total_cost,
            schedule: out.schedule.iter().map(ScheduleRowBody::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SacSummaryBody {
    #[serde(rename = "primeiraParcela", with = "rust_decimal::serde::float")]
    pub first_installment: Decimal,
    #[serde(rename = "ultimaParcela", with = "rust_decimal::serde::float")]
    pub last_installment: Decimal,
    #[serde(rename = "totalJuros", with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(rename = "custoTotal", with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSummaryBody {
    #[serde(rename = "parcelaFixa", with = "rust_decimal::serde::float")]
    pub fixed_installment: Decimal,
    #[serde(rename = "totalJuros", with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(rename = "custoTotal", with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeltaBody {
    #[serde(rename = "juros", with = "rust_decimal::serde::float")]
    pub interest: Decimal,
    #[serde(rename = "custoTotal", with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    #[serde(rename = "valorFinanciado", with = "rust_decimal::serde::float")]
    pub financed_amount: Decimal,
    pub sac: SacSummaryBody,
    pub price: PriceSummaryBody,
    #[serde(rename = "diferenca")]
    pub difference: DeltaBody,
}

impl From<&ComparisonOutput> for ComparisonResponse {
    fn from(out: &ComparisonOutput) -> Self {
        ComparisonResponse {
            financed_amount: out.financed_amount,
            sac: SacSummaryBody {
                first_installment: out.sac.first_installment,
                last_installment: out.sac.last_installment,
                total_interest: out.sac.total_interest,
                total_cost: out.sac.total_cost,
            },
            price: PriceSummaryBody {
                fixed_installment: out.price.fixed_installment,
                total_interest: out.price.total_interest,
                total_cost: out.price.total_cost,
            },
            difference: DeltaBody {
                interest: out.difference.interest,
                total_cost: out.difference.total_cost,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_numbers_and_strings() {
        let body: LoanRequestBody = serde_json::from_value(json!({
            "valorImovel": 350000,
            "valorEntrada": "70000.50",
            "prazoAnos": 30,
            "taxaJuros": 10.5,
            "sistemaAmortizacao": "PRICE"
        }))
        .unwrap();
        let req = SimulationRequest::from(body);
        assert_eq!(req.property_value, Some(Decimal::from(350_000)));
        assert_eq!(req.down_payment.map(|d| d.to_string()), Some("70000.50".into()));
        assert_eq!(req.term_years, Some(30));
        assert_eq!(req.method.as_deref(), Some("PRICE"));
    }

    #[test]
    fn test_request_keeps_negative_term_for_validation() {
        let body: LoanRequestBody = serde_json::from_value(json!({ "prazoAnos": -5 })).unwrap();
        assert_eq!(body.term_years, Some(-5));
    }

    #[test]
    fn test_request_missing_fields_are_none() {
        let body: LoanRequestBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.property_value.is_none());
        assert!(body.method.is_none());
    }

    #[test]
    fn test_row_serializes_with_wire_names() {
        let row = ScheduleRowBody {
            period: 1,
            installment: Decimal::new(933333, 2),
            interest: Decimal::new(100000, 2),
            principal_paid: Decimal::new(833333, 2),
            remaining_balance: Decimal::new(9166667, 2),
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["mes"], 1);
        assert_eq!(v["parcela"], 9333.33);
        assert_eq!(v["juros"], 1000.0);
        assert_eq!(v["saldoDevedor"], 91666.67);
    }
}
