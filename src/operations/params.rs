//! Shared parameter types
//!
//! Host-supplied parameters are deserialized once per invocation into these
//! structs and validated before any network call.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::Deserialize;

/// Parameters for single-entity operations (`get` and friends)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityParams {
    /// Entity ID. Hosts may supply it under the resource-specific name
    /// (`queueId`, `userId`, ...) or plain `id`.
    #[serde(
        alias = "queueId",
        alias = "userId",
        alias = "conversationId",
        alias = "groupId",
        alias = "divisionId",
        alias = "oauthClientId",
        alias = "actionId"
    )]
    pub id: String,
}

impl EntityParams {
    /// Deserialize and validate from the host's parameter map
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        let parsed: Self = serde_json::from_value(params.clone())?;
        if parsed.id.trim().is_empty() {
            return Err(Error::validation("id must not be empty"));
        }
        Ok(parsed)
    }
}

/// Parameters for list operations
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    /// Fetch every page instead of honoring `limit`
    pub return_all: bool,
    /// Maximum items to return when `return_all` is false
    pub limit: usize,
    /// Endpoint-specific filter/sort options, passed through as query
    /// parameters (e.g. `state`, `sortOrder`, `expand`)
    pub options: JsonObject,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            return_all: false,
            limit: 50,
            options: JsonObject::new(),
        }
    }
}

impl ListParams {
    /// Deserialize from the host's parameter map
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        if params.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(params.clone())?)
    }

    /// The item cap handed to the pagination engine (0 = unlimited)
    pub fn effective_limit(&self) -> usize {
        if self.return_all {
            0
        } else {
            self.limit
        }
    }

    /// The caller's options as a query map
    pub fn query(&self) -> JsonObject {
        self.options.clone()
    }
}
