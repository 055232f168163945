//! OAuth client operations
//!
//! `getUsage` drives a server-side asynchronous job: submit the usage query,
//! then poll the results endpoint on a fixed interval, a bounded number of
//! times, until the job completes, fails, or the attempts run out.

use super::params::{EntityParams, ListParams};
use super::OperationKind;
use crate::client::GenesysClient;
use crate::error::{Error, Result};
use crate::models::UsageRow;
use crate::types::{JsonObject, JsonValue, Method, PaginationLocation};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Polling settings for the usage-query job
#[derive(Debug, Clone)]
pub struct JobPollConfig {
    /// Maximum number of result polls before timing out
    pub max_attempts: u32,
    /// Delay between polls
    pub interval: Duration,
}

impl Default for JobPollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(3),
        }
    }
}

/// Parameters for `oauthClient.getUsage`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageParams {
    /// OAuth client to report on
    pub oauth_client_id: String,
    /// Interval start (ISO 8601)
    pub start_date: String,
    /// Interval end (ISO 8601)
    pub end_date: String,
    #[serde(default)]
    pub options: UsageOptions,
}

/// Optional usage-query settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageOptions {
    pub metrics: Option<Vec<String>>,
    pub group_by: Option<Vec<String>>,
    pub granularity: Option<String>,
}

impl UsageParams {
    /// Deserialize and validate from the host's parameter map
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        let parsed: Self = serde_json::from_value(params.clone())?;

        if parsed.oauth_client_id.trim().is_empty() {
            return Err(Error::validation("oauthClientId must not be empty"));
        }
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

    /// Assemble the usage-query submission body
    pub fn body(&self) -> JsonValue {
        let metrics = self
            .options
            .metrics
            .clone()
            .unwrap_or_else(|| vec!["Requests".to_string()]);
        let group_by = self
            .options
            .group_by
            .clone()
            .unwrap_or_else(|| vec!["TemplateUri".to_string(), "HttpMethod".to_string()]);

        let mut body = JsonObject::new();
        body.insert(
            "interval".to_string(),
            json!(format!("{}/{}", self.start_date, self.end_date)),
        );
        body.insert("metrics".to_string(), json!(metrics));
        body.insert("groupBy".to_string(), json!(group_by));
        if let Some(granularity) = &self.options.granularity {
            body.insert("granularity".to_string(), json!(granularity));
        }
        JsonValue::Object(body)
    }
}

/// Execute an OAuth client operation
pub async fn execute_with_poll(
    client: &GenesysClient,
    operation: OperationKind,
    params: &JsonValue,
    poll: &JobPollConfig,
) -> Result<Vec<JsonValue>> {
    match operation {
        OperationKind::Get => {
            let entity = EntityParams::from_value(params)?;
            let response = client
                .request(
                    Method::GET,
                    &format!("/api/v2/oauth/clients/{}", entity.id),
                    &JsonValue::Null,
                    &JsonObject::new(),
                )
                .await?;
            Ok(vec![response])
        }
        OperationKind::GetAll => {
            let list = ListParams::from_value(params)?;
            client
                .request_all_items(
                    "entities",
                    Method::GET,
                    "/api/v2/oauth/clients",
                    &JsonValue::Null,
                    &list.query(),
                    list.effective_limit(),
                    PaginationLocation::Query,
                )
                .await
        }
        OperationKind::GetUsage => {
            let usage = UsageParams::from_value(params)?;
            let report = get_usage(client, &usage, poll).await?;
            Ok(vec![report])
        }
        _ => Ok(Vec::new()),
    }
}

/// Submit a usage query and poll until it resolves
async fn get_usage(
    client: &GenesysClient,
    params: &UsageParams,
    poll: &JobPollConfig,
) -> Result<JsonValue> {
    let submit = client
        .request(
            Method::POST,
            &format!(
                "/api/v2/oauth/clients/{}/usage/query",
                params.oauth_client_id
            ),
            &params.body(),
            &JsonObject::new(),
        )
        .await?;

    let execution_id = submit
        .get("executionId")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| {
            Error::api_message(format!(
                "Usage query for OAuth client {} returned no executionId",
                params.oauth_client_id
            ))
        })?
        .to_string();

    let results_path = format!(
        "/api/v2/oauth/clients/{}/usage/query/results/{}",
        params.oauth_client_id, execution_id
    );

    for attempt in 1..=poll.max_attempts {
        let result = client
            .request(Method::GET, &results_path, &JsonValue::Null, &JsonObject::new())
            .await?;

        let status = result
            .get("queryStatus")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_uppercase();

        match status.as_str() {
            "COMPLETE" => {
                debug!("usage query {execution_id} completed after {attempt} polls");
                return Ok(summarize_usage(params, &result));
            }
            "FAILED" => {
                return Err(Error::job_failed(format!(
                    "Usage query failed for OAuth client {}",
                    params.oauth_client_id
                )));
            }
            _ => tokio::time::sleep(poll.interval).await,
        }
    }

    Err(Error::JobTimeout {
        attempts: poll.max_attempts,
    })
}

/// Reduce the raw result rows into the connector's usage report
fn summarize_usage(params: &UsageParams, result: &JsonValue) -> JsonValue {
    let rows: Vec<UsageRow> = result
        .get("results")
        .and_then(JsonValue::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| serde_json::from_value(row.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let total_requests: u64 = rows.iter().map(|row| row.requests).sum();
    let requests_per_endpoint: Vec<JsonValue> = rows
        .iter()
        .map(|row| {
            let endpoint = [row.http_method.as_deref(), row.template_uri.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            json!({"endpoint": endpoint, "requests": row.requests})
        })
        .collect();

    json!({
        "startDate": params.start_date,
        "endDate": params.end_date,
        "totalRequests": total_requests,
        "requestsPerEndpoint": requests_per_endpoint,
    })
}
