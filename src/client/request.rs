//! Authenticated request primitive
//!
//! Builds one call against the region-scoped base URL. Empty body and query
//! maps are omitted from the outgoing request entirely; failures surface as a
//! single API error kind. No retries.

use crate::auth::Authenticator;
use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the Platform API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL override; derived from the credentials' region when unset
    pub base_url: Option<String>,
    /// Token endpoint override; derived from the region when unset
    pub token_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token_url: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("genesys-cloud-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Authenticated client for the Genesys Cloud Platform API
pub struct GenesysClient {
    http: Client,
    base_url: String,
    authenticator: Authenticator,
}

impl GenesysClient {
    /// Create a client from a connector configuration
    pub fn new(config: &ConnectorConfig) -> Self {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a client with explicit client settings
    pub fn with_client_config(config: &ConnectorConfig, client_config: ClientConfig) -> Self {
        let authenticator = match &client_config.token_url {
            Some(url) => Authenticator::client_credentials_with_url(&config.credentials, url),
            None => Authenticator::client_credentials(&config.credentials),
        };
        let base_url = client_config
            .base_url
            .clone()
            .unwrap_or_else(|| config.credentials.region.api_base());
        Self::from_parts(base_url, authenticator, &client_config)
    }

    /// Create a client from a base URL and an authenticator
    pub fn with_parts(base_url: impl Into<String>, authenticator: Authenticator) -> Self {
        Self::from_parts(base_url, authenticator, &ClientConfig::default())
    }

    fn from_parts(
        base_url: impl Into<String>,
        authenticator: Authenticator,
        client_config: &ClientConfig,
    ) -> Self {
        let http = Client::builder()
            .timeout(client_config.timeout)
            .user_agent(&client_config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authenticator,
        }
    }

    /// The base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make one authenticated request against the Platform API.
    ///
    /// An empty `body` (empty object, empty array, or null) is not sent at
    /// all, and an empty `query` produces no query string. The decoded JSON
    /// payload is returned verbatim; an empty response body decodes to null.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: &JsonValue,
        query: &JsonObject,
    ) -> Result<JsonValue> {
        let url = format!("{}{}", self.base_url, path);

        let mut req = self
            .http
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            req = req.query(&query_pairs(query));
        }

        if !is_empty_payload(body) {
            req = req.json(body);
        }

        let req = self.authenticator.apply(req).await?;

        let response = req
            .send()
            .await
            .map_err(|e| Error::api(format!("{} {} failed", method_name(method), url), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api_message(format!(
                "HTTP {} from {} {}: {}",
                status.as_u16(),
                method_name(method),
                url,
                body
            )));
        }

        debug!("{} {} -> {}", method_name(method), url, status.as_u16());

        let text = response
            .text()
            .await
            .map_err(|e| Error::api(format!("reading response from {url}"), e))?;
        if text.is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| Error::api_message(format!("invalid JSON from {url}: {e}")))
    }
}

impl std::fmt::Debug for GenesysClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenesysClient")
            .field("base_url", &self.base_url)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
    }
}

/// A body counts as empty when it would serialize to `{}`, `[]`, or null
pub(crate) fn is_empty_payload(body: &JsonValue) -> bool {
    match body {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Flatten a JSON query map into string pairs for the URL
fn query_pairs(query: &JsonObject) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}
