//! # Pennylane SDK
//!
//! Async Rust client for the Pennylane external accounting API (v2).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pennylane_sdk::{api::ListQuery, PennylaneClient, PennylaneResult};
//!
//! #[tokio::main]
//! async fn main() -> PennylaneResult<()> {
//!     let client = PennylaneClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     // Unpaid customer invoices, newest first
//!     let invoices = client
//!         .customer_invoices()
//!         .list(ListQuery::new().filter("paid:eq:false"))
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&invoices).unwrap_or_default());
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! Every endpoint returns the decoded JSON body as a [`serde_json::Value`],
//! with object keys in the order the API sent them.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{PennylaneClient, PennylaneClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{PennylaneError, PennylaneResult};
