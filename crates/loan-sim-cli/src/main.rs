mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::ScheduleArgs;
use commands::simulation::{CompareArgs, SimulateArgs};

/// SAC and Price loan amortization simulator
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "SAC and Price loan amortization simulator",
    long_about = "A CLI for simulating loan and mortgage amortization with decimal \
                  precision. Builds month-by-month schedules under the constant \
                  amortization (SAC) and fixed installment (Price) systems and \
                  compares the two."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Constant amortization (SAC) schedule for a principal, monthly rate and term
    Sac(ScheduleArgs),
    /// Fixed installment (Price) schedule for a principal, monthly rate and term
    Price(ScheduleArgs),
    /// Simulate a property loan from price, down payment, years and annual rate
    Simulate(SimulateArgs),
    /// Compare SAC and Price on the same property loan
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sac(args) => commands::amortization::run_sac(args),
        Commands::Price(args) => commands::amortization::run_price(args),
        Commands::Simulate(args) => commands::simulation::run_simulate(args),
        Commands::Compare(args) => commands::simulation::run_compare(args),
        Commands::Version => {
            println!("loansim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
