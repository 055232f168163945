//! Resource operations
//!
//! Each Platform API resource gets a module that resolves typed, validated
//! parameters into calls on the client. Dispatch is a closed enum pair
//! (resource x operation) matched exhaustively; an operation a resource does
//! not support yields an empty result set.

mod conversation;
mod data_action;
mod division;
mod group;
mod oauth_client;
mod params;
mod queue;
mod user;

pub use conversation::{ConversationListParams, ConversationOptions, SegmentFilter};
pub use oauth_client::{JobPollConfig, UsageOptions, UsageParams};
pub use params::{EntityParams, ListParams};
pub use queue::{AddMembersParams, QueueCreateParams, UserIds};

use crate::client::GenesysClient;
use crate::error::Result;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};


// ============================================================================
// Dispatch
// ============================================================================

/// A Platform API resource exposed by the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Queue,
    User,
    Conversation,
    Group,
    Division,
    OauthClient,
    DataAction,
}

/// An operation kind, shared across resources.
///
/// Not every kind applies to every resource; dispatch returns an empty
/// result set for combinations a resource does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Create,
    Get,
    GetAll,
    GetMembers,
    AddMembers,
    GetQueues,
    GetUsage,
    GetIntegrations,
}

/// Execute one operation against the Platform API.
///
/// `params` is the raw parameter map supplied by the host for this item;
/// each resource module deserializes it into its typed parameter struct and
/// validates it before any request is issued.
pub async fn execute(
    client: &GenesysClient,
    resource: Resource,
    operation: OperationKind,
    params: &JsonValue,
) -> Result<Vec<JsonValue>> {
    execute_with_poll(client, resource, operation, params, &JobPollConfig::default()).await
}

/// Execute one operation with explicit job-polling settings (only the OAuth
/// client usage query polls a server-side job; other operations ignore this)
pub async fn execute_with_poll(
    client: &GenesysClient,
    resource: Resource,
    operation: OperationKind,
    params: &JsonValue,
    poll: &JobPollConfig,
) -> Result<Vec<JsonValue>> {
    match resource {
        Resource::Queue => queue::execute(client, operation, params).await,
        Resource::User => user::execute(client, operation, params).await,
        Resource::Conversation => conversation::execute(client, operation, params).await,
        Resource::Group => group::execute(client, operation, params).await,
        Resource::Division => division::execute(client, operation, params).await,
        Resource::OauthClient => {
            oauth_client::execute_with_poll(client, operation, params, poll).await
        }
        Resource::DataAction => data_action::execute(client, operation, params).await,
    }
}
