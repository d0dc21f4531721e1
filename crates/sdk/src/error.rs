//! Error types for the Pennylane SDK.

/// Result type for SDK operations.
pub type PennylaneResult<T> = Result<T, PennylaneError>;

/// Error types that can occur when talking to the Pennylane API.
#[derive(Debug, thiserror::Error)]
pub enum PennylaneError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced an HTTP response (connection, TLS, timeout,
    /// or the client was already closed).
    #[error("Request failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// API returned a non-2xx response.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// A success response whose body is not valid JSON.
    #[error("Invalid JSON in API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Declared operation with no implementation behind it.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl PennylaneError {
    /// Error returned for any request issued after [`crate::PennylaneClient::close`].
    pub(crate) fn closed() -> Self {
        Self::Transport {
            message: "client is closed".to_string(),
            source: None,
        }
    }

    /// Whether the request failed before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PennylaneError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Transport {
            message,
            source: Some(err),
        }
    }
}
