//! Batch execution
//!
//! Runs a sequence of operation invocations strictly sequentially, pairing
//! every output item with the index of the input item that produced it.
//! `continue_on_fail` decides whether a failing item is recorded and skipped
//! or aborts the whole batch.

use crate::client::GenesysClient;
use crate::error::Result;
use crate::operations::{self, OperationKind, Resource};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// One operation to run, typically derived from one input item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    /// Target resource
    pub resource: Resource,
    /// Operation to perform
    pub operation: OperationKind,
    /// Raw parameters; deserialized and validated by the resource module
    #[serde(default)]
    pub params: JsonValue,
}

/// An output item paired with its originating input item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionItem {
    /// The item payload
    pub json: JsonValue,
    /// Index of the input item this output belongs to
    pub item_index: usize,
}

/// Execute a batch of invocations in order.
///
/// With `continue_on_fail`, a failing invocation contributes one error item
/// for its input index and execution moves on; otherwise the first failure
/// aborts the batch, tagged with the failing item's index.
pub async fn execute_batch(
    client: &GenesysClient,
    invocations: &[Invocation],
    continue_on_fail: bool,
) -> Result<Vec<ExecutionItem>> {
    let mut output = Vec::new();

    for (item_index, invocation) in invocations.iter().enumerate() {
        let result = operations::execute(
            client,
            invocation.resource,
            invocation.operation,
            &invocation.params,
        )
        .await;

        match result {
            Ok(items) => {
                output.extend(items.into_iter().map(|json| ExecutionItem {
                    json,
                    item_index,
                }));
            }
            Err(err) => {
                if continue_on_fail {
                    warn!("item {item_index} failed, continuing: {err}");
                    output.push(ExecutionItem {
                        json: json!({"error": err.to_string()}),
                        item_index,
                    });
                } else {
                    return Err(err.with_item_index(item_index));
                }
            }
        }
    }

    Ok(output)
}
