use clap::Parser;
use loan_sim_api::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    run_server(config).await
}
