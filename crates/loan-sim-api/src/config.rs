use clap::Parser;
use std::net::SocketAddr;

use loan_sim_core::simulation::{ValidationPolicy, DEFAULT_MAX_TERM_MONTHS};

/// Server settings, from flags or environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "loan-sim-api",
    version,
    about = "HTTP service for SAC and Price loan simulations"
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "LOAN_SIM_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Accept a 0% interest rate (rejected by default)
    #[arg(long, env = "LOAN_SIM_ALLOW_ZERO_RATE")]
    pub allow_zero_rate: bool,

    /// Longest accepted term in months
    #[arg(long, env = "LOAN_SIM_MAX_TERM_MONTHS", default_value_t = DEFAULT_MAX_TERM_MONTHS)]
    pub max_term_months: u32,
}

impl ServerConfig {
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allow_zero_rate: self.allow_zero_rate,
            max_term_months: self.max_term_months,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse::<SocketAddr>()?)
    }
}
