use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use loan_sim_core::simulation::ValidationPolicy;

use crate::handlers;

/// Create the application router with all API endpoints
pub fn create_router(policy: ValidationPolicy) -> Router {
    // Browser front ends call the API from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/simular", post(handlers::simulate))
        .route("/api/comparar", post(handlers::compare))
        .with_state(Arc::new(policy))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
