//! Alert definition creation linked to a webhook integration

use std::path::Path;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::patch;
use crate::webhooks::read_document;

/// Location of the webhook integration reference inside an alert definition
pub const INTEGRATION_ID_PATH: &str = "notificationGroup.webhooks.0.integration.integrationId";

/// Created alert definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    /// Empty when the response did not carry `alertDef.id`
    pub id: String,
}

/// Point the first notification webhook of an alert definition at
/// `integration_id`. Everything else in the document is left untouched.
pub fn link_integration(alert_doc: &[u8], integration_id: i64) -> Result<Vec<u8>, Error> {
    patch::set_bytes(alert_doc, INTEGRATION_ID_PATH, &integration_id).map_err(Error::from)
}

impl PlatformClient {
    /// Create the alert definition at `alert_file`, linked to the webhook
    /// integration `integration_id`.
    pub async fn create_alert(
        &self,
        alert_file: &Path,
        integration_id: i64,
    ) -> Result<AlertRecord, Error> {
        let document = read_document(alert_file).await?;
        let body = link_integration(&document, integration_id)?;

        let request = self
            .authorized(self.http().post(self.url("/v3/alert-defs")))
            .body(body);
        let response = self.execute(request).await?;

        // The alert already exists at this point; an unparsable body yields
        // an empty ID rather than an error.
        let id = match serde_json::from_slice::<serde_json::Value>(&response) {
            Ok(parsed) => parsed
                .pointer("/alertDef/id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                tracing::warn!("Failed to parse alert creation response: {}", e);
                String::new()
            }
        };

        if id.is_empty() {
            tracing::warn!("Alert creation response did not include an alert ID");
        }
        tracing::info!(alert_id = %id, integration_id, "Alert created successfully with ID: {}", id);

        Ok(AlertRecord { id })
    }
}
