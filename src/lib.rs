//! # Genesys Cloud Connector
//!
//! A Rust-native connector for the Genesys Cloud Platform API, exposing its
//! contact-center resources (queues, users, conversations, groups,
//! divisions, OAuth clients, data actions) as callable operations.
//!
//! The heart of the crate is one authenticated request primitive and one
//! page-walking primitive that transparently handles the three pagination
//! styles the Platform API uses across its endpoints: `pageNumber` in the
//! query string, a `paging` object embedded in the request body (analytics
//! queries), and opaque cursors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use genesys_cloud_connector::client::GenesysClient;
//! use genesys_cloud_connector::config::ConnectorConfig;
//! use genesys_cloud_connector::types::{Method, PaginationLocation};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> genesys_cloud_connector::Result<()> {
//!     let config = ConnectorConfig::from_path("connector.yaml")?;
//!     let client = GenesysClient::new(&config);
//!
//!     // One request
//!     let me = client
//!         .request(Method::GET, "/api/v2/tokens/me", &json!({}), &Default::default())
//!         .await?;
//!
//!     // All pages of a list endpoint
//!     let queues = client
//!         .request_all_items(
//!             "entities",
//!             Method::GET,
//!             "/api/v2/routing/queues",
//!             &json!({}),
//!             &Default::default(),
//!             0,
//!             PaginationLocation::Query,
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Executor                            │
//! │  batch of invocations → per-item results (paired)        │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────────────────┴───────────────────────────────┐
//! │                     Operations                           │
//! │  queue │ user │ conversation │ group │ division │ ...    │
//! │  typed params, validated before any request              │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//! ┌──────────────────────────┴───────────────────────────────┐
//! │   Client: request primitive + pagination engine          │
//! │   (pageNumber query │ paging body │ cursor)              │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//! ┌──────────────────────────┴───────────────────────────────┐
//! │   Auth: OAuth2 client credentials, cached token          │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Typed models for API payloads
pub mod models;

/// Connector configuration and credentials
pub mod config;

/// OAuth2 authentication
pub mod auth;

/// Platform API client: request primitive and pagination engine
pub mod client;

/// Resource operations
pub mod operations;

/// Batch execution
pub mod executor;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::GenesysClient;
pub use config::ConnectorConfig;
pub use error::{Error, Result};
pub use executor::{execute_batch, ExecutionItem, Invocation};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
