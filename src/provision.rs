//! Webhook and alert provisioning sequence

use std::path::PathBuf;

use crate::client::PlatformClient;
use crate::error::{Error, Stage};

/// What to provision
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// JSON body of the webhook
    pub webhook_file: PathBuf,
    /// JSON body of the alert definition to link to the webhook
    pub alert_file: Option<PathBuf>,
}

/// Alert created and linked during a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAlert {
    pub external_id: i64,
    pub alert_id: String,
}

/// Result of a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub webhook_id: String,
    pub alert: Option<LinkedAlert>,
}

/// Create the webhook, then (if an alert file was given) resolve its
/// integration ID and create the alert linked to it.
///
/// Stages run strictly in order and the first failure aborts the rest. A
/// webhook created before a later failure is left in place.
pub async fn provision(
    client: &PlatformClient,
    request: &ProvisionRequest,
) -> Result<ProvisionOutcome, Error> {
    let webhook_id = client
        .create_webhook(&request.webhook_file)
        .await
        .map_err(|e| e.in_stage(Stage::CreateWebhook))?;

    let Some(alert_file) = &request.alert_file else {
        tracing::debug!("No alert file given, skipping alert creation");
        return Ok(ProvisionOutcome {
            webhook_id,
            alert: None,
        });
    };

    let external_id = client
        .resolve_external_id(&webhook_id)
        .await
        .map_err(|e| e.in_stage(Stage::ResolveWebhook))?;

    let alert = client
        .create_alert(alert_file, external_id)
        .await
        .map_err(|e| e.in_stage(Stage::CreateAlert))?;

    Ok(ProvisionOutcome {
        webhook_id,
        alert: Some(LinkedAlert {
            external_id,
            alert_id: alert.id,
        }),
    })
}
