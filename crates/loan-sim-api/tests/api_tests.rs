use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use loan_sim_api::create_router;
use loan_sim_core::simulation::ValidationPolicy;

// ===========================================================================
// Helpers
// ===========================================================================

fn app() -> Router {
    create_router(ValidationPolicy::default())
}

async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn apartment(method: &str) -> String {
    json!({
        "valorImovel": 112000,
        "valorEntrada": 12000,
        "prazoAnos": 1,
        "taxaJuros": 12,
        "sistemaAmortizacao": method
    })
    .to_string()
}

// ===========================================================================
// simular
// ===========================================================================

#[tokio::test]
async fn test_simulate_sac() {
    let (status, body) = post_json(app(), "/api/simular", apartment("SAC")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sistemaAmortizacao"], "sac");
    assert_eq!(body["valorFinanciado"], 100000.0);
    assert_eq!(body["prazoMeses"], 12);
    assert_eq!(body["primeiraParcela"], 9333.33);
    assert_eq!(body["ultimaParcela"], 8416.67);
    assert_eq!(body["totalJuros"], 6500.0);
    assert_eq!(body["custoTotal"], 106500.0);

    let rows = body["tabela"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["mes"], 1);
    assert_eq!(rows[0]["juros"], 1000.0);
    assert_eq!(rows[0]["amortizacao"], 8333.33);
    assert_eq!(rows[11]["saldoDevedor"], 0.0);
}

#[tokio::test]
async fn test_simulate_price() {
    let (status, body) = post_json(app(), "/api/simular", apartment("price")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sistemaAmortizacao"], "price");
    assert_eq!(body["primeiraParcela"], 8884.88);
    assert_eq!(body["ultimaParcela"], 8884.88);
    assert_eq!(body["totalJuros"], 6618.55);
    assert_eq!(body["taxaEfetivaAnual"], 0.126825);
}

#[tokio::test]
async fn test_simulate_defaults_to_sac_without_selector() {
    let body = json!({
        "valorImovel": 112000,
        "valorEntrada": 12000,
        "prazoAnos": 1,
        "taxaJuros": 12
    })
    .to_string();
    let (status, body) = post_json(app(), "/api/simular", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sistemaAmortizacao"], "sac");
}

#[tokio::test]
async fn test_simulate_rejects_down_payment_at_property_value() {
    let body = json!({
        "valorImovel": 100000,
        "valorEntrada": 100000,
        "prazoAnos": 10,
        "taxaJuros": 9
    })
    .to_string();
    let (status, body) = post_json(app(), "/api/simular", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("down_payment"));
}

#[tokio::test]
async fn test_simulate_rejects_missing_and_zero_values() {
    let (status, body) = post_json(app(), "/api/simular", "{}".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("property_value"));

    let zero_rate = json!({ "valorImovel": 1000, "prazoAnos": 1, "taxaJuros": 0 }).to_string();
    let (status, _) = post_json(app(), "/api/simular", zero_rate).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_rate_accepted_when_allowed() {
    let app = create_router(ValidationPolicy {
        allow_zero_rate: true,
        ..ValidationPolicy::default()
    });
    let body = json!({
        "valorImovel": 12000,
        "prazoAnos": 1,
        "taxaJuros": 0,
        "sistemaAmortizacao": "price"
    })
    .to_string();
    let (status, body) = post_json(app, "/api/simular", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["primeiraParcela"], 1000.0);
    assert_eq!(body["totalJuros"], 0.0);
}

#[tokio::test]
async fn test_simulate_echoes_lowercased_selector() {
    let (status, body) = post_json(app(), "/api/simular", apartment("Frances")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sistemaAmortizacao"], "frances");
    assert_eq!(body["primeiraParcela"], 8884.88);
}

#[tokio::test]
async fn test_simulate_rejects_negative_term() {
    let body = json!({
        "valorImovel": 100000,
        "valorEntrada": 0,
        "prazoAnos": -5,
        "taxaJuros": 9
    })
    .to_string();
    let (status, body) = post_json(app(), "/api/simular", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("term_years"));
}

#[tokio::test]
async fn test_simulate_high_rate_fifty_years() {
    let body = json!({
        "valorImovel": 100000,
        "valorEntrada": 0,
        "prazoAnos": 50,
        "taxaJuros": 120,
        "sistemaAmortizacao": "price"
    })
    .to_string();
    let (status, body) = post_json(app(), "/api/simular", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prazoMeses"], 600);
    assert_eq!(body["primeiraParcela"], 10000.0);
    assert_eq!(body["tabela"].as_array().unwrap().len(), 600);
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    let (status, body) = post_json(app(), "/api/simular", "{not json".into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ===========================================================================
// comparar
// ===========================================================================

#[tokio::test]
async fn test_compare() {
    let (status, body) = post_json(app(), "/api/comparar", apartment("sac")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valorFinanciado"], 100000.0);
    assert_eq!(body["sac"]["primeiraParcela"], 9333.33);
    assert_eq!(body["sac"]["ultimaParcela"], 8416.67);
    assert_eq!(body["sac"]["totalJuros"], 6500.0);
    assert_eq!(body["sac"]["custoTotal"], 106500.0);
    assert_eq!(body["price"]["parcelaFixa"], 8884.88);
    assert_eq!(body["price"]["totalJuros"], 6618.55);
    assert_eq!(body["price"]["custoTotal"], 106618.55);
    assert_eq!(body["diferenca"]["juros"], 118.55);
    assert_eq!(body["diferenca"]["custoTotal"], 118.55);
}

#[tokio::test]
async fn test_compare_validates_input() {
    let body = json!({ "valorImovel": 100000, "prazoAnos": 0, "taxaJuros": 9 }).to_string();
    let (status, body) = post_json(app(), "/api/comparar", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("term_years"));
}

#[tokio::test]
async fn test_compare_rejects_negative_term() {
    let body = json!({ "valorImovel": 100000, "prazoAnos": -5, "taxaJuros": 9 }).to_string();
    let (status, body) = post_json(app(), "/api/comparar", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("term_years"));
}

#[tokio::test]
async fn test_compare_high_rate_fifty_years() {
    let body = json!({
        "valorImovel": 100000,
        "valorEntrada": 0,
        "prazoAnos": 50,
        "taxaJuros": 120
    })
    .to_string();
    let (status, body) = post_json(app(), "/api/comparar", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"]["parcelaFixa"], 10000.0);
    assert_eq!(body["sac"]["primeiraParcela"], 10166.67);
}

// ===========================================================================
// health
// ===========================================================================

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
