//! Data action (integrations) operations

use super::params::{EntityParams, ListParams};
use super::OperationKind;
use crate::client::GenesysClient;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue, Method, PaginationLocation};

/// Execute a data action operation
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
                    &format!("/api/v2/integrations/actions/{}", entity.id),
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
                    "/api/v2/integrations/actions",
                    &JsonValue::Null,
                    &list.query(),
                    list.effective_limit(),
                    PaginationLocation::Query,
                )
                .await
        }
        OperationKind::GetIntegrations => {
            let list = ListParams::from_value(params)?;
            client
                .request_all_items(
                    "entities",
                    Method::GET,
                    "/api/v2/integrations",
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
