//! Client configuration: credentials, region and endpoint selection

use std::time::Duration;

use crate::error::Error;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CORALOGIX_API_KEY";
/// Environment variable selecting the region
pub const REGION_ENV: &str = "CORALOGIX_REGION";
/// Environment variable overriding the management API base URL
pub const API_URL_ENV: &str = "CORALOGIX_API_URL";

/// Per-request timeout applied to every platform call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Coralogix deployment region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Region {
    Eu1,
    #[default]
    Eu2,
    Us1,
    Us2,
    Ap1,
    Ap2,
    Ap3,
}

impl Region {
    /// Domain the region's services are served from
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Eu1 => "coralogix.com",
            Region::Eu2 => "eu2.coralogix.com",
            Region::Us1 => "coralogix.us",
            Region::Us2 => "cx498.coralogix.com",
            Region::Ap1 => "coralogix.in",
            Region::Ap2 => "coralogixsg.com",
            Region::Ap3 => "ap3.coralogix.com",
        }
    }

    /// Management API base URL for this region
    pub fn api_base_url(&self) -> String {
        format!("https://api.{}/mgmt/openapi", self.domain())
    }
}

/// Settings shared by every request made against the platform
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Management API base URL, without trailing slash
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config for the given key against the default region
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Region::default().api_base_url(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a region's management API
    pub fn with_region(mut self, region: Region) -> Self {
        self.base_url = region.api_base_url();
        self
    }

    /// Point the client at an explicit base URL
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Set per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Pick the API key from an explicit value (flag or environment), rejecting
/// missing and blank keys.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String, Error> {
    match explicit.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(Error::Config(format!(
            "API key is required. Set {} environment variable or use --api-key flag",
            API_KEY_ENV
        ))),
    }
}

fn normalize_base_url(raw: &str) -> Result<String, Error> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Invalid API URL '{}': unsupported scheme '{}'",
            raw,
            url.scheme()
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
