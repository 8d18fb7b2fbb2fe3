use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;

use crate::config::ClientConfig;
use crate::error::Error;

/// Scheme override header expected by the platform's HTTP/2 front end.
/// Requests without it are rejected with 401.
pub const SCHEME_OVERRIDE_HEADER: &str = "x-http2-scheme";

/// Client for the Coralogix management API
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlatformClient {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of `path` with `segment` appended as one percent-encoded path
    /// segment.
    pub(crate) fn url_with_segment(&self, path: &str, segment: &str) -> Result<reqwest::Url, Error> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL '{}' cannot have a path", self.base_url)))?
            .push(segment);
        Ok(url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Attach the headers every platform call needs: JSON content type,
    /// bearer authorization and the `x-http2-scheme: https` override.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .header(SCHEME_OVERRIDE_HEADER, "https")
    }

    /// Send a request and read the whole response body.
    ///
    /// The body is consumed on every path, error statuses included, so the
    /// connection is released before returning.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

        if status.as_u16() >= 400 {
            return Err(Error::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(body.to_vec())
    }
}
