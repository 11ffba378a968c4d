//! CVA CLI - Command Line Driver for Swap CVA Calculations
//!
//! # Commands
//!
//! - `cva run --request <file>` - Run a CVA calculation and print the report as JSON
//! - `cva check --request <file>` - Validate a request without simulating
//!
//! # Configuration
//!
//! Flags override environment variables, which override the request file,
//! which overrides the library defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::RunOverrides;
use error::Result;

/// Monte Carlo CVA for interest-rate swaps
#[derive(Parser)]
#[command(name = "cva")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error); overrides --verbose
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the request file.
#[derive(Args)]
struct OverrideArgs {
    /// Number of Monte Carlo paths
    #[arg(short = 'n', long, env = "CVA_NUM_PATHS")]
    num_paths: Option<usize>,

    /// RNG seed; omit for a fresh seed reported in the output
    #[arg(short, long, env = "CVA_SEED")]
    seed: Option<u64>,

    /// Dedicated worker threads
    #[arg(short, long, env = "CVA_THREADS")]
    threads: Option<usize>,

    /// Paths per batch
    #[arg(long, env = "CVA_BATCH_SIZE")]
    batch_size: Option<usize>,

    /// Leading paths kept in the report for plotting
    #[arg(long)]
    retain_paths: Option<usize>,
}

impl From<OverrideArgs> for RunOverrides {
    fn from(args: OverrideArgs) -> Self {
        RunOverrides {
            num_paths: args.num_paths,
            seed: args.seed,
            threads: args.threads,
            batch_size: args.batch_size,
            retained_paths: args.retain_paths,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a CVA calculation
    Run {
        /// Request file (TOML or JSON)
        #[arg(short, long)]
        request: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a request without simulating
    Check {
        /// Request file (TOML or JSON)
        #[arg(short, long)]
        request: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// An explicit level wins; otherwise `RUST_LOG`, then `default_level`.
fn init_tracing(explicit_level: Option<&str>, default_level: &str) {
    let filter = match explicit_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    init_tracing(cli.log_level.as_deref(), default_level);
    debug!(verbose = cli.verbose, "Logging initialised");

    match cli.command {
        Commands::Run {
            request,
            overrides,
            output,
            pretty,
        } => commands::run::run(&request, &overrides.into(), output.as_deref(), pretty),
        Commands::Check { request, overrides } => {
            commands::check::run(&request, &overrides.into())
        }
    }
}
