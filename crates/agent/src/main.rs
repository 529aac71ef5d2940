//! `calc-agent` -- computing worker for the distributed calculator.
//!
//! Polls the orchestrator for tasks, simulates their cost, computes them
//! and reports the results back.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                         |
//! |------------------------|----------|-------------------------|-------------------------------------|
//! | `ORCHESTRATOR_URL`     | no       | `http://localhost:8080` | Orchestrator base URL               |
//! | `POLL_INTERVAL_MS`     | no       | `2000`                  | Wait between polls when idle        |
//! | `COMPUTING_POWER`      | no       | `1`                     | Number of concurrent poll loops     |
//! | `REQUEST_TIMEOUT_SECS` | no       | `10`                    | Per-request HTTP timeout            |

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calc_agent::config::AgentConfig;
use calc_agent::runner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calc_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid agent configuration");
        std::process::exit(1);
    });

    tracing::info!(
        orchestrator_url = %config.orchestrator_url,
        computing_power = config.computing_power,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        "Starting calc-agent",
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            return;
        }
        tracing::info!("Received SIGINT (Ctrl-C), finishing in-flight tasks");
        signal_cancel.cancel();
    });

    if let Err(e) = runner::run(&config, cancel).await {
        tracing::error!(error = %e, "Agent failed to start");
        std::process::exit(1);
    }

    tracing::info!("Agent stopped");
}
