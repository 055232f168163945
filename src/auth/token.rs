//! Token acquisition and caching
//!
//! Token attachment is the transport's concern: the request path asks the
//! authenticator for a bearer token and never sees credentials.

use crate::config::Credentials;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cached access token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

/// How the authenticator obtains tokens
enum TokenSource {
    /// OAuth2 client-credentials against the region's login endpoint
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
    },
    /// A fixed token supplied by the caller (tests, externally managed auth)
    Static(String),
}

/// Attaches bearer authentication to Platform API requests
pub struct Authenticator {
    source: TokenSource,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create an authenticator for the client-credentials flow.
    /// The token endpoint is derived from the credentials' region.
    pub fn client_credentials(credentials: &Credentials) -> Self {
        let token_url = format!("{}/oauth/token", credentials.region.login_base());
        Self::client_credentials_with_url(credentials, token_url)
    }

    /// Client-credentials flow against an explicit token endpoint
    pub fn client_credentials_with_url(
        credentials: &Credentials,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            source: TokenSource::ClientCredentials {
                token_url: token_url.into(),
                client_id: credentials.client_id.clone(),
                client_secret: credentials.client_secret.clone(),
            },
            cached_token: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Create an authenticator that always uses the given token
    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
            cached_token: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Apply bearer authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.bearer_token().await?;
        Ok(req.bearer_auth(token))
    }

    /// Get a valid bearer token, fetching or refreshing if necessary
    pub async fn bearer_token(&self) -> Result<String> {
        if let TokenSource::Static(token) = &self.source {
            return Ok(token.clone());
        }

        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token using the client-credentials grant
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        let TokenSource::ClientCredentials {
            token_url,
            client_id,
            client_secret,
        } = &self.source
        else {
            return Err(Error::auth("Token refresh not supported for static tokens"));
        };

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::TokenRefresh {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| Error::TokenRefresh {
                message: e.to_string(),
            })?;
        Ok(token_response.into_cached_token())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.source {
            TokenSource::ClientCredentials { token_url, .. } => {
                format!("client_credentials({token_url})")
            }
            TokenSource::Static(_) => "static".to_string(),
        };
        f.debug_struct("Authenticator")
            .field("source", &mode)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(seconds) => CachedToken::expires_in(self.access_token, seconds),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
