//! Outgoing webhook creation and lookup

use std::path::Path;

use serde::Deserialize;

use crate::client::PlatformClient;
use crate::error::Error;

/// Created webhook, as returned by the creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookRecord {
    pub id: String,
}

/// Webhook details relevant to alert linkage
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDetails {
    /// Integration ID alert definitions use to reference the webhook
    pub external_id: i64,
}

#[derive(Debug, Deserialize)]
struct WebhookDetailsResponse {
    webhook: WebhookDetails,
}

impl PlatformClient {
    /// Create a webhook from the JSON definition at `webhook_file`, sent
    /// verbatim, and return its ID.
    pub async fn create_webhook(&self, webhook_file: &Path) -> Result<String, Error> {
        let body = read_document(webhook_file).await?;

        let request = self
            .authorized(self.http().post(self.url("/v1/outgoing-webhooks")))
            .body(body);
        let response = self.execute(request).await?;

        let record: WebhookRecord = serde_json::from_slice(&response).map_err(|e| {
            Error::Parse(format!("Failed to parse webhook creation response: {}", e))
        })?;

        tracing::info!(webhook_id = %record.id, "Webhook created successfully with ID: {}", record.id);

        Ok(record.id)
    }

    /// Look up a webhook and return its external (integration) ID
    pub async fn resolve_external_id(&self, webhook_id: &str) -> Result<i64, Error> {
        let url = self.url_with_segment("/v1/outgoing-webhooks", webhook_id)?;
        let request = self.authorized(self.http().get(url));
        let response = self.execute(request).await?;

        let details: WebhookDetailsResponse = serde_json::from_slice(&response).map_err(|e| {
            Error::Parse(format!("Failed to parse webhook details response: {}", e))
        })?;
        let external_id = details.webhook.external_id;

        tracing::info!(
            webhook_id = %webhook_id,
            external_id,
            "Webhook external (integration) ID: {}. The alert will be linked to this webhook via this value.",
            external_id
        );

        Ok(external_id)
    }
}

/// Read a request document from disk as raw bytes
pub(crate) async fn read_document(path: &Path) -> Result<Vec<u8>, Error> {
    tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
