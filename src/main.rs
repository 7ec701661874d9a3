//! ColumbusToken walkthrough.
//!
//! # Overview
//!
//! ```text
//!   private key ──▶ wallet address
//!                        │
//!                        ▼
//!   endpoint ──▶ ETH balance ──▶ name / symbol / totalSupply / balanceOf
//!                                              │
//!                                              ▼
//!                nonce ──▶ build getToken() ──▶ sign ──▶ submit | discard
//! ```
//!
//! The report goes to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use columbus_claim::config::resolve_config;
use columbus_claim::observability::logging;
use columbus_claim::workflow::{self, Report, Walkthrough, WorkflowError};

#[derive(Parser)]
#[command(name = "columbus-claim")]
#[command(about = "Query the ColumbusToken contract and claim a token", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./columbus.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the read path, then build and sign the claim transaction
    Run {
        /// Broadcast the signed claim transaction
        #[arg(long)]
        submit: bool,
    },
    /// List the contract interface descriptor's entries
    Abi,
    /// Print the wallet address derived from the configured key
    Address,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let log = logging::init(logging::BOOTSTRAP_LEVEL);

    match run(cli, &log).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Walkthrough failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, log: &logging::LogHandle) -> Result<(), WorkflowError> {
    let config = resolve_config(cli.config.as_deref())?;
    log.set_level(&config.observability.log_level);

    tracing::info!("columbus-claim v{} starting", env!("CARGO_PKG_VERSION"));

    let mut report = Report::new(std::io::stdout().lock());

    match cli.command {
        Commands::Run { submit } => {
            let walkthrough = Walkthrough::new(config)?;
            walkthrough.run(submit, &mut report).await?;
        }
        Commands::Abi => {
            workflow::describe_interface(&config, &mut report)?;
        }
        Commands::Address => {
            workflow::derive_address(&config, &mut report)?;
        }
    }

    Ok(())
}
