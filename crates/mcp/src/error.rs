// Error types for the MCP adapter

use pennylane_sdk::PennylaneError;

/// Failure of a single tool call. Always reported back to the caller as text.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Missing required argument or argument of the wrong shape.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// Transport, API, decode or not-implemented failure from the client.
    #[error(transparent)]
    Api(#[from] PennylaneError),

    #[error("Failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Startup configuration failure. Fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingApiKey(&'static str),

    #[error("Invalid Pennylane client configuration: {0}")]
    Client(#[from] PennylaneError),
}

/// Tool catalog inconsistency detected while building the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool registered twice: {0}")]
    Duplicate(String),

    #[error("Tool {key} is registered under a different name than its schema ({schema_name})")]
    NameMismatch { key: String, schema_name: String },

    #[error("Invalid input schema for tool {tool}: {reason}")]
    InvalidSchema { tool: String, reason: String },
}

/// Failure of the stdio server loop itself.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Writer task failed: {0}")]
    Writer(String),
}
