//! Error types for the Genesys Cloud connector
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Genesys Cloud connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Validation error: {message}")]
    Validation { message: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    // ============================================================================
    // API Errors
    // ============================================================================
    /// A request to the Platform API failed in transit or at the remote end.
    /// Carries the underlying cause and, once the executor attaches it, the
    /// index of the input item that triggered the request.
    #[error("Genesys Cloud API request failed: {message}")]
    Api {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
        item_index: Option<usize>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Asynchronous Job Errors
    // ============================================================================
    #[error("Server-side job failed: {message}")]
    JobFailed { message: String },

    #[error("Timed out waiting for server-side job after {attempts} attempts")]
    JobTimeout { attempts: u32 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an API error from a transport failure
    pub fn api(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Api {
            message: message.into(),
            source: Some(source),
            item_index: None,
        }
    }

    /// Create an API error without an underlying transport cause
    /// (non-success status, malformed payload)
    pub fn api_message(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            source: None,
            item_index: None,
        }
    }

    /// Create a job failure error
    pub fn job_failed(message: impl Into<String>) -> Self {
        Self::JobFailed {
            message: message.into(),
        }
    }

    /// Attach the originating input item index to an API error.
    /// Other error kinds pass through unchanged.
    pub fn with_item_index(self, index: usize) -> Self {
        match self {
            Self::Api {
                message, source, ..
            } => Self::Api {
                message,
                source,
                item_index: Some(index),
            },
            other => other,
        }
    }

    /// The input item index this error originated from, if known
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::Api { item_index, .. } => *item_index,
            _ => None,
        }
    }
}

/// Result type alias for the Genesys Cloud connector
pub type Result<T> = std::result::Result<T, Error>;
