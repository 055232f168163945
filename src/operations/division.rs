//! Authorization division operations

use super::params::{EntityParams, ListParams};
use super::OperationKind;
use crate::client::GenesysClient;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue, Method, PaginationLocation};

/// Execute a division operation
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
                    &format!("/api/v2/authorization/divisions/{}", entity.id),
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
                    "/api/v2/authorization/divisions",
                    &JsonValue::Null,
                    &list.query(),
                    list.effective_limit(),
                    PaginationLocation::Query,
                )
                .await
        }
        _ => Ok(Vec::new()),
    }
}
