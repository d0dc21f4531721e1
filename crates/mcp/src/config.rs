// Server configuration resolved from the environment

use crate::error::ConfigError;
use pennylane_sdk::{ClientConfig, PennylaneClient};
use std::time::Duration;

pub const API_KEY_ENV: &str = "PENNYLANE_API_KEY";
pub const BASE_URL_ENV: &str = "PENNYLANE_BASE_URL";
pub const TIMEOUT_ENV: &str = "PENNYLANE_TIMEOUT_SECS";

/// Fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    client: ClientConfig,
}

impl ServerConfig {
    /// A missing or blank API key fails before anything else is validated.
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let client = ClientConfig::new(api_key, base_url)?.with_timeout(timeout);
        Ok(Self { client })
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client
    }

    /// Build the one client shared by every tool.
    pub fn build_client(&self) -> Result<PennylaneClient, ConfigError> {
        Ok(PennylaneClient::from_config(self.client.clone())?)
    }
}
