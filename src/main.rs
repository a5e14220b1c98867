//! circuit-gate diagnostic CLI.
//!
//! ```text
//! circuit-gate check --config gate.toml
//!     → load + validate → print effective settings (JSON)
//!
//! circuit-gate probe --config gate.toml --url http://host/health --count 20
//!     → BreakerClient → one line per request → final breaker snapshot (JSON)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use circuit_gate::config::{load_config, GateConfig};
use circuit_gate::observability::logging::init_logging;
use circuit_gate::{BreakerClient, BreakerError, CallError, CircuitBreaker};

#[derive(Parser)]
#[command(name = "circuit-gate")]
#[command(about = "Inspect and exercise circuit breaker settings", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the effective settings
    Check,
    /// Send requests to a URL through a breaker and report each outcome
    Probe {
        /// Target URL
        #[arg(short, long)]
        url: String,

        /// Number of sequential requests
        #[arg(short = 'n', long, default_value_t = 10)]
        count: u32,

        /// Pause between requests in milliseconds
        #[arg(short, long, default_value_t = 100)]
        interval_ms: u64,
    },
}

/// One line of `probe` output.
#[derive(Serialize)]
struct ProbeLine {
    attempt: u32,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    state: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };
    init_logging(&config.observability)?;

    match cli.command {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Probe {
            url,
            count,
            interval_ms,
        } => {
            probe(config, &url, count, Duration::from_millis(interval_ms)).await?;
        }
    }

    Ok(())
}

async fn probe(
    config: GateConfig,
    url: &str,
    count: u32,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let breaker = Arc::new(CircuitBreaker::new(config.breaker)?);
    let client = BreakerClient::new(reqwest::Client::new(), breaker.clone());

    tracing::info!(breaker = %breaker.id(), url = %url, count, "Probing dependency");

    for attempt in 1..=count {
        let (outcome, status) = match client.get(url).await {
            Ok(res) => ("success", Some(res.status().as_u16())),
            Err(CallError::Rejected(BreakerError::Open { .. })) => ("rejected_open", None),
            Err(CallError::Rejected(BreakerError::HalfOpen { .. })) => ("rejected_half_open", None),
            Err(CallError::Inner(e)) => {
                let status = e.status().map(|s| s.as_u16());
                if status.is_some_and(|s| s >= 500) {
                    ("fault", status)
                } else {
                    ("error", status)
                }
            }
        };

        let line = ProbeLine {
            attempt,
            outcome,
            status,
            state: breaker.state().to_string(),
        };
        println!("{}", serde_json::to_string(&line)?);

        if attempt < count {
            tokio::time::sleep(interval).await;
        }
    }

    println!("{}", serde_json::to_string_pretty(&breaker.snapshot())?);
    Ok(())
}
