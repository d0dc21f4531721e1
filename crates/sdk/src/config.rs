//! Configuration types for the Pennylane SDK.

use crate::error::{PennylaneError, PennylaneResult};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Production root of the Pennylane external API.
pub const DEFAULT_BASE_URL: &str = "https://app.pennylane.com/api/external/v2";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Pennylane client.
///
/// Immutable once built: the credential and base URL stay fixed for the
/// lifetime of the client that owns them.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Bearer token sent with every request.
    api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration, validating and normalizing the base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl AsRef<str>) -> PennylaneResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PennylaneError::Config("api_key must not be empty".to_string()));
        }

        let base_url = normalize_base_url(base_url.as_ref())?;

        Ok(Self {
            base_url,
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn normalize_base_url(raw: &str) -> PennylaneResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(PennylaneError::Config(format!(
            "base_url must use http or https, got: {}",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
