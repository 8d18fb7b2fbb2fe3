//! cx-webhook: Coralogix webhook and alert provisioning
//!
//! Creates an outgoing webhook in Coralogix and, optionally, an alert
//! definition that notifies through it. The two are linked by the webhook's
//! external (integration) ID, which is looked up after creation and written
//! into the alert definition before it is submitted.
//!
//! # Example
//!
//! ```no_run
//! use cx_webhook::{provision, ClientConfig, PlatformClient, ProvisionRequest};
//!
//! # async fn run() -> Result<(), cx_webhook::Error> {
//! let client = PlatformClient::new(&ClientConfig::new("api-key"))?;
//! let outcome = provision(
//!     &client,
//!     &ProvisionRequest {
//!         webhook_file: "webhook.json".into(),
//!         alert_file: Some("alert.json".into()),
//!     },
//! )
//! .await?;
//! println!("Webhook {}", outcome.webhook_id);
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod patch;
pub mod provision;
pub mod webhooks;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use alerts::{link_integration, AlertRecord};
pub use client::PlatformClient;
pub use config::{ClientConfig, Region};
pub use error::{Error, Stage};
pub use patch::PatchError;
pub use provision::{provision, LinkedAlert, ProvisionOutcome, ProvisionRequest};
pub use webhooks::{WebhookDetails, WebhookRecord};
