//! cx-webhook
//!
//! Run with: cx-webhook create --webhook-file webhook.json [--alert-file alert.json]
//!
//! Environment variables:
//! - CORALOGIX_API_KEY: API key, used when --api-key is not given
//! - CORALOGIX_REGION: Region (default: eu2)
//! - CORALOGIX_API_URL: Management API base URL, overrides the region
//! - RUST_LOG: Log filter (default: cx_webhook=info)

use std::process::ExitCode;

use clap::Parser;
use cx_webhook::cli::{failure_line, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "cx_webhook=debug"
    } else {
        "cx_webhook=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Always printed, independent of RUST_LOG
            eprintln!("{}", failure_line(&e));
            tracing::debug!(error = ?e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
