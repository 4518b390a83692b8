use tokio::signal;

use crate::{config::ServerConfig, router::create_router};

/// Install the tracing subscriber and serve until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_sim_api=info,tower_http=info".into()),
        )
        .init();

    let policy = config.policy();
    if policy.allow_zero_rate {
        tracing::warn!("zero interest rates are accepted");
    }

    let addr = config.socket_addr()?;
    let app = create_router(policy);

    tracing::info!(max_term_months = config.max_term_months, "Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
