//! Conversation operations
//!
//! `getAll` drives the analytics conversation-detail query, which differs
//! from the plain list endpoints: it is a POST whose interval, ordering and
//! segment filters live in the body, items come back under `conversations`,
//! and the page token is a `paging` object embedded in the body.

use super::params::EntityParams;
use super::OperationKind;
use crate::client::GenesysClient;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method, PaginationLocation};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;

/// A segment-level dimension filter from the host's predicate builder
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentFilter {
    /// Segment dimension (`direction`, `mediaType`, `queueId`, `userId`,
    /// `wrapUpCode`)
    pub dimension: String,
    /// Predicate operator (`matches`, `exists`, `notExists`)
    pub operator: String,
    /// Dimension value; only meaningful for `matches`
    #[serde(default)]
    pub value: Option<String>,
}

/// Parameters for `conversation.getAll`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationListParams {
    #[serde(default)]
    pub return_all: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Interval start (ISO 8601)
    pub start_date: String,
    /// Interval end (ISO 8601)
    pub end_date: String,
    #[serde(default)]
    pub options: ConversationOptions,
}

/// Optional ordering and filtering for the analytics query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationOptions {
    pub order: Option<String>,
    pub order_by: Option<String>,
    pub segment_filters: Vec<SegmentFilter>,
}

fn default_limit() -> usize {
    50
}

impl ConversationListParams {
    /// Deserialize and validate from the host's parameter map.
    /// Malformed dates and inverted ranges are rejected before any request.
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        let parsed: Self = serde_json::from_value(params.clone())?;

        let start = DateTime::parse_from_rfc3339(&parsed.start_date).map_err(|_| {
            Error::validation(format!(
                "Invalid start date format: \"{}\". Provide an ISO 8601 date string \
                 (e.g., 2024-01-01T00:00:00Z).",
                parsed.start_date
            ))
        })?;
        let end = DateTime::parse_from_rfc3339(&parsed.end_date).map_err(|_| {
            Error::validation(format!(
                "Invalid end date format: \"{}\". Provide an ISO 8601 date string \
                 (e.g., 2024-01-31T23:59:59Z).",
                parsed.end_date
            ))
        })?;
        if start >= end {
            return Err(Error::validation(format!(
                "Start date ({}) must be before end date ({}).",
                parsed.start_date, parsed.end_date
            )));
        }

        Ok(parsed)
    }

    /// The item cap handed to the pagination engine (0 = unlimited)
    pub fn effective_limit(&self) -> usize {
        if self.return_all {
            0
        } else {
            self.limit
        }
    }

    /// Assemble the analytics query body (without the paging token, which
    /// the pagination engine embeds per page)
    pub fn body(&self) -> JsonValue {
        let mut body = JsonObject::new();
        body.insert(
            "interval".to_string(),
            json!(format!("{}/{}", self.start_date, self.end_date)),
        );
        if let Some(order) = &self.options.order {
            body.insert("order".to_string(), json!(order));
        }
        if let Some(order_by) = &self.options.order_by {
            body.insert("orderBy".to_string(), json!(order_by));
        }
        if !self.options.segment_filters.is_empty() {
            let predicates: Vec<JsonValue> = self
                .options
                .segment_filters
                .iter()
                .map(|filter| {
                    let mut predicate = JsonObject::new();
                    predicate.insert("type".to_string(), json!("dimension"));
                    predicate.insert("dimension".to_string(), json!(filter.dimension));
                    predicate.insert("operator".to_string(), json!(filter.operator));
                    // The API only accepts a value on `matches` predicates
                    if filter.operator == "matches" {
                        if let Some(value) = filter.value.as_ref().filter(|v| !v.is_empty()) {
                            predicate.insert("value".to_string(), json!(value));
                        }
                    }
                    JsonValue::Object(predicate)
                })
                .collect();
            body.insert(
                "segmentFilters".to_string(),
                json!([{"type": "and", "predicates": predicates}]),
            );
        }
        JsonValue::Object(body)
    }
}

/// Execute a conversation operation
pub async fn execute(
    client: &GenesysClient,
    operation: OperationKind,
    params: &JsonValue,
) -> Result<Vec<JsonValue>> {
    match operation {
        OperationKind::Get => {
            let entity = EntityParams::from_value(params)?;
            let response = client
                .request(
                    Method::GET,
                    &format!("/api/v2/conversations/{}", entity.id),
                    &JsonValue::Null,
                    &JsonObject::new(),
                )
                .await?;
            Ok(vec![response])
        }
        OperationKind::GetAll => {
            let list = ConversationListParams::from_value(params)?;
            client
                .request_all_items(
                    "conversations",
                    Method::POST,
                    "/api/v2/analytics/conversations/details/query",
                    &list.body(),
                    &JsonObject::new(),
                    list.effective_limit(),
                    PaginationLocation::Body,
                )
                .await
        }
        _ => Ok(Vec::new()),
    }
}
