// MCP (Model Context Protocol) server exposing the Pennylane API as tools
// to agent clients over stdio

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use dispatcher::Dispatcher;
pub use error::{ConfigError, RegistryError, ServerError, ToolError};
pub use server::McpServer;
pub use tools::{build_registry, ToolRegistry};
