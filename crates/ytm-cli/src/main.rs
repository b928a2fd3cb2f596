mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::fixed_income::YieldToMaturityArgs;

/// Bond yield-to-maturity calculations
#[derive(Parser)]
#[command(
    name = "ytm",
    version,
    about = "Bond yield-to-maturity calculations",
    long_about = "A CLI for approximate bond yield-to-maturity with decimal precision. \
                  Reads inputs from flags, a JSON/YAML file, or stdin and prints \
                  JSON, table, CSV, or just the yield."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Approximate yield to maturity from coupon, face value, price and years
    #[command(alias = "ytm")]
    YieldToMaturity(YieldToMaturityArgs),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::YieldToMaturity(args) => commands::fixed_income::run_yield_to_maturity(args),
        Commands::Version => {
            println!("ytm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let outcome = result.and_then(|value| {
        output::format_output(&cli.output, &value).map_err(|e| e.into())
    });

    match outcome {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
