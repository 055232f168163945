//! Routing queue operations

use super::params::{EntityParams, ListParams};
use super::OperationKind;
use crate::client::GenesysClient;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method, OptionStringExt, PaginationLocation};
use serde::Deserialize;
use serde_json::json;

/// Parameters for `queue.create`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueCreateParams {
    /// Queue name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Division to create the queue in
    #[serde(default)]
    pub division_id: Option<String>,
    /// Extra queue settings forwarded verbatim (media settings, routing
    /// rules, scoring method, ...)
    #[serde(default)]
    pub additional_fields: JsonObject,
}

impl QueueCreateParams {
    /// Deserialize and validate from the host's parameter map
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        let parsed: Self = serde_json::from_value(params.clone())?;
        if parsed.name.trim().is_empty() {
            return Err(Error::validation("queue name must not be empty"));
        }
        Ok(parsed)
    }

    /// Assemble the creation request body
    pub fn body(&self) -> JsonValue {
        let mut body = JsonObject::new();
        body.insert("name".to_string(), json!(self.name));
        if let Some(description) = self.description.clone().none_if_empty() {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(division_id) = self.division_id.clone().none_if_empty() {
            body.insert("division".to_string(), json!({"id": division_id}));
        }
        for (key, value) in &self.additional_fields {
            body.insert(key.clone(), value.clone());
        }
        JsonValue::Object(body)
    }
}

/// Parameters for `queue.addMembers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersParams {
    /// Target queue
    pub queue_id: String,
    /// Users to add; a list or a comma-separated string
    pub user_ids: UserIds,
}

/// User IDs as the host supplies them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserIds {
    List(Vec<String>),
    Csv(String),
}

impl AddMembersParams {
    /// Deserialize and validate from the host's parameter map
    pub fn from_value(params: &JsonValue) -> Result<Self> {
        let parsed: Self = serde_json::from_value(params.clone())?;
        if parsed.queue_id.trim().is_empty() {
            return Err(Error::validation("queueId must not be empty"));
        }
        if parsed.member_ids().is_empty() {
            return Err(Error::validation("userIds must contain at least one ID"));
        }
        Ok(parsed)
    }

    /// The normalized, trimmed member ID list
    pub fn member_ids(&self) -> Vec<String> {
        let raw: Vec<String> = match &self.user_ids {
            UserIds::List(ids) => ids.clone(),
            UserIds::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// The members array posted to the queue membership endpoint
    pub fn body(&self) -> JsonValue {
        let members: Vec<JsonValue> = self
            .member_ids()
            .into_iter()
            .map(|id| json!({"id": id}))
            .collect();
        JsonValue::Array(members)
    }
}

/// Execute a queue operation
pub async fn execute(
    client: &GenesysClient,
    operation: OperationKind,
    params: &JsonValue,
) -> Result<Vec<JsonValue>> {
    match operation {
        OperationKind::Create => {
            let create = QueueCreateParams::from_value(params)?;
            let response = client
                .request(
                    Method::POST,
                    "/api/v2/routing/queues",
                    &create.body(),
                    &JsonObject::new(),
                )
                .await?;
            Ok(vec![response])
        }
        OperationKind::Get => {
            let entity = EntityParams::from_value(params)?;
            let response = client
                .request(
                    Method::GET,
                    &format!("/api/v2/routing/queues/{}", entity.id),
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
                    "/api/v2/routing/queues",
                    &JsonValue::Null,
                    &list.query(),
                    list.effective_limit(),
                    PaginationLocation::Query,
                )
                .await
        }
        OperationKind::GetMembers => {
            let entity = EntityParams::from_value(params)?;
            let list = ListParams::from_value(params)?;
            client
                .request_all_items(
                    "entities",
                    Method::GET,
                    &format!("/api/v2/routing/queues/{}/members", entity.id),
                    &JsonValue::Null,
                    &list.query(),
                    list.effective_limit(),
                    PaginationLocation::Query,
                )
                .await
        }
        OperationKind::AddMembers => {
            let add = AddMembersParams::from_value(params)?;
            let response = client
                .request(
                    Method::POST,
                    &format!("/api/v2/routing/queues/{}/members", add.queue_id),
                    &add.body(),
                    &JsonObject::new(),
                )
                .await?;
            // The membership endpoint replies with an empty body
            match response {
                JsonValue::Null => Ok(Vec::new()),
                other => Ok(vec![other]),
            }
        }
        _ => Ok(Vec::new()),
    }
}
