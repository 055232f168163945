//! Connector configuration
//!
//! Credentials and runtime settings, loaded from a YAML file:
//!
//! ```yaml
//! credentials:
//!   client_id: "..."
//!   client_secret: "..."
//!   region: mypurecloud.ie
//! continue_on_fail: false
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ============================================================================
// Region
// ============================================================================

/// A Genesys Cloud region, identified by its API domain.
///
/// The region selects both the API base (`https://api.<region>`) and the
/// login base (`https://login.<region>`). The value is treated as an opaque
/// domain string so new regions work without a code change; the documented
/// regions are available as constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// US East (Virginia)
    pub const US_EAST: &'static str = "mypurecloud.com";
    /// US West (Oregon)
    pub const US_WEST: &'static str = "usw2.pure.cloud";
    /// Canada (Central)
    pub const CANADA: &'static str = "cac1.pure.cloud";
    /// Europe (Ireland)
    pub const EU_IRELAND: &'static str = "mypurecloud.ie";
    /// Europe (London)
    pub const EU_LONDON: &'static str = "euw2.pure.cloud";
    /// Europe (Frankfurt)
    pub const EU_FRANKFURT: &'static str = "mypurecloud.de";
    /// Asia Pacific (Tokyo)
    pub const AP_TOKYO: &'static str = "mypurecloud.jp";
    /// Asia Pacific (Sydney)
    pub const AP_SYDNEY: &'static str = "mypurecloud.com.au";

    /// Create a region from its API domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    /// The region's API domain (e.g., `mypurecloud.com`)
    pub fn domain(&self) -> &str {
        &self.0
    }

    /// Base URL for Platform API requests
    pub fn api_base(&self) -> String {
        format!("https://api.{}", self.0)
    }

    /// Base URL for OAuth token requests
    pub fn login_base(&self) -> String {
        format!("https://login.{}", self.0)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(Self::US_EAST.to_string())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(domain: &str) -> Self {
        Self::new(domain)
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// OAuth2 client-credentials for the Platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Genesys Cloud region
    #[serde(default)]
    pub region: Region,
}

impl Credentials {
    /// Validate that the required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(Error::missing_field("credentials.client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(Error::missing_field("credentials.client_secret"));
        }
        if self.region.domain().is_empty() {
            return Err(Error::missing_field("credentials.region"));
        }
        Ok(())
    }
}

// ============================================================================
// Connector Config
// ============================================================================

/// Complete connector configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// API credentials
    pub credentials: Credentials,

    /// When an item's operation fails, record the error against that item
    /// and continue with the next item instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl ConnectorConfig {
    /// Load a configuration from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse a configuration from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.credentials.validate()?;
        Ok(config)
    }
}
