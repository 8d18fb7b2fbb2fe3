//! Command-line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::PlatformClient;
use crate::config::{resolve_api_key, ClientConfig, Region, API_KEY_ENV, API_URL_ENV, REGION_ENV};
use crate::error::Error;
use crate::provision::{provision, ProvisionOutcome, ProvisionRequest};

#[derive(Debug, Parser)]
#[command(name = "cx-webhook")]
#[command(about = "Manage Coralogix webhooks and (optional) alert definitions.")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Creates a webhook. If an alert file is also provided, the alert
    /// definition is created and linked to the webhook.
    Create(CreateArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Path to file containing JSON body of the webhook
    #[arg(long)]
    pub webhook_file: PathBuf,

    /// Path to file containing JSON body of the alert definition
    #[arg(long)]
    pub alert_file: Option<PathBuf>,

    /// The Coralogix API key to use for authentication
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Coralogix region hosting the account
    #[arg(long, value_enum, env = REGION_ENV, default_value = "eu2")]
    pub region: Region,

    /// Management API base URL, overrides --region
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<(), Error> {
        match self.command {
            Commands::Create(args) => {
                let outcome = args.run().await?;
                print_outcome(&outcome);
                Ok(())
            }
        }
    }
}

impl CreateArgs {
    /// Build the client configuration. Fails before any request is made when
    /// no API key is available.
    pub fn client_config(&self) -> Result<ClientConfig, Error> {
        let api_key = resolve_api_key(self.api_key.as_deref())?;
        let config = ClientConfig::new(api_key).with_region(self.region);

        match &self.api_url {
            Some(url) => config.with_base_url(url),
            None => Ok(config),
        }
    }

    pub async fn run(&self) -> Result<ProvisionOutcome, Error> {
        let client = PlatformClient::new(&self.client_config()?)?;
        tracing::debug!(base_url = %client.base_url(), "Using management API");

        let request = ProvisionRequest {
            webhook_file: self.webhook_file.clone(),
            alert_file: self.alert_file.clone(),
        };

        provision(&client, &request).await
    }
}

/// Single line reported on stderr when a run fails
pub fn failure_line(err: &Error) -> String {
    format!("Error: {}", err)
}

fn print_outcome(outcome: &ProvisionOutcome) {
    println!("Webhook: {}", outcome.webhook_id);
    if let Some(alert) = &outcome.alert {
        println!(
            "Alert:   {} (linked via integration ID {})",
            alert.alert_id, alert.external_id
        );
    }
}
