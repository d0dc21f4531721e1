//! Main client for the Pennylane SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{PennylaneError, PennylaneResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;

/// Main client for interacting with the Pennylane API.
///
/// Clones share one connection pool; hand clones (or references) to every
/// consumer instead of building a second client.
#[derive(Debug, Clone)]
pub struct PennylaneClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl PennylaneClient {
    /// Create a new client builder.
    pub fn builder() -> PennylaneClientBuilder {
        PennylaneClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PennylaneResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the customer invoices API.
    pub fn customer_invoices(&self) -> CustomerInvoicesApi<'_> {
        CustomerInvoicesApi::new(self)
    }

    /// Get the supplier invoices API.
    pub fn supplier_invoices(&self) -> SupplierInvoicesApi<'_> {
        SupplierInvoicesApi::new(self)
    }

    /// Get the quotes API.
    pub fn quotes(&self) -> QuotesApi<'_> {
        QuotesApi::new(self)
    }

    /// Get the customers API.
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi::new(self)
    }

    /// Get the suppliers API.
    pub fn suppliers(&self) -> SuppliersApi<'_> {
        SuppliersApi::new(self)
    }

    /// Get the transactions API.
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    /// Get the accounting API.
    pub fn accounting(&self) -> AccountingApi<'_> {
        AccountingApi::new(self)
    }

    /// Close the underlying connections.
    ///
    /// Affects every clone of this client. Calls made afterwards fail with a
    /// transport error. Returns `false` if the client was already closed.
    pub fn close(&self) -> bool {
        let closed = self.http.close();
        if closed {
            tracing::debug!("Pennylane client closed");
        }
        closed
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_closed()
    }
}

/// Builder for creating a PennylaneClient.
pub struct PennylaneClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl PennylaneClientBuilder {
    /// Create a new builder pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> PennylaneResult<PennylaneClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| PennylaneError::Config("api_key is required".to_string()))?;

        let config = ClientConfig::new(api_key, &self.base_url)?.with_timeout(self.timeout);

        PennylaneClient::from_config(config)
    }
}

impl Default for PennylaneClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
