//! Page-walking primitive
//!
//! The Platform API paginates inconsistently: most list endpoints take
//! `pageNumber` in the query string and report `pageNumber`/`pageCount`,
//! the analytics query endpoints take a `paging` object in the POST body,
//! and a few endpoints hand back an opaque `cursor` instead. This module
//! walks all three styles behind one call.

use super::request::GenesysClient;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue, Method, PaginationLocation};
use serde_json::json;
use tracing::debug;

/// Page size embedded in body-paged requests
const BODY_PAGE_SIZE: u64 = 25;

/// Per-fetch pagination state.
///
/// Owned by a single fetch and discarded when it finishes; nothing is shared
/// across fetches.
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Current page number, starting at 1
    pub page_number: u64,
    /// Cursor returned by the last page, if any
    pub cursor: Option<String>,
}

impl PaginationState {
    /// State for the first page of a fetch
    pub fn new() -> Self {
        Self {
            page_number: 1,
            cursor: None,
        }
    }

    /// Advance to the next page number
    pub fn next_page(&mut self) {
        self.page_number += 1;
    }

    /// Record the cursor for the next request
    pub fn set_cursor(&mut self, cursor: impl Into<String>) {
        self.cursor = Some(cursor.into());
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

/// How the next page is addressed, decided from one page's response
#[derive(Debug, Clone, PartialEq, Eq)]
enum Continuation {
    /// Echo this cursor back in the next request's query
    Cursor(String),
    /// Advance the page number
    NextPage,
    /// Last page reached
    Done,
}

impl GenesysClient {
    /// Fetch every page of a list endpoint and concatenate the items found
    /// under `property_name`, capped at `limit` items when `limit > 0`.
    ///
    /// Each page's request is rebuilt from the caller's original `body` and
    /// `query` plus only the current pagination token, so caller-supplied
    /// fields survive on every page and derived fields never accumulate.
    /// Any request failure aborts the fetch; no partial results are returned.
    #[allow(clippy::too_many_arguments)]
    pub async fn request_all_items(
        &self,
        property_name: &str,
        method: Method,
        endpoint: &str,
        body: &JsonValue,
        query: &JsonObject,
        limit: usize,
        pagination_location: PaginationLocation,
    ) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        let mut state = PaginationState::new();

        loop {
            let (request_body, request_query) =
                build_page_request(body, query, &state, pagination_location);

            let page = self
                .request(method, endpoint, &request_body, &request_query)
                .await?;

            // A page without an array under the named property contributes
            // zero items but does not by itself end the walk.
            if let Some(page_items) = page.get(property_name).and_then(JsonValue::as_array) {
                items.extend(page_items.iter().cloned());
            }

            if limit > 0 && items.len() >= limit {
                items.truncate(limit);
                debug!(
                    "pagination of {endpoint} stopped at limit {limit} on page {}",
                    state.page_number
                );
                break;
            }

            match continuation(&page) {
                Continuation::Cursor(cursor) => state.set_cursor(cursor),
                Continuation::NextPage => {
                    state.cursor = None;
                    state.next_page();
                }
                Continuation::Done => break,
            }
        }

        Ok(items)
    }
}

/// Derive one page's request from the caller's original body/query and the
/// current pagination state. The originals are never touched.
fn build_page_request(
    original_body: &JsonValue,
    original_query: &JsonObject,
    state: &PaginationState,
    location: PaginationLocation,
) -> (JsonValue, JsonObject) {
    // Cursor continuation always rides in the query string and resets the
    // body to the caller's original.
    if let Some(cursor) = &state.cursor {
        let mut query = original_query.clone();
        query.insert("cursor".to_string(), json!(cursor));
        return (original_body.clone(), query);
    }

    match location {
        PaginationLocation::Body => {
            let mut body = match original_body {
                JsonValue::Object(map) => map.clone(),
                _ => JsonObject::new(),
            };
            body.insert(
                "paging".to_string(),
                json!({
                    "pageSize": BODY_PAGE_SIZE,
                    "pageNumber": state.page_number,
                }),
            );
            (JsonValue::Object(body), original_query.clone())
        }
        PaginationLocation::Query => {
            let mut query = original_query.clone();
            query.insert("pageNumber".to_string(), json!(state.page_number));
            (original_body.clone(), query)
        }
    }
}

/// Decide how to continue from one page's response.
///
/// A non-empty cursor wins over page-count hints; page-count continuation
/// requires both `pageNumber` and `pageCount` present and nonzero with
/// `pageNumber < pageCount`. Anything else means the last page.
fn continuation(page: &JsonValue) -> Continuation {
    if let Some(cursor) = page.get("cursor").and_then(JsonValue::as_str) {
        if !cursor.is_empty() {
            return Continuation::Cursor(cursor.to_string());
        }
    }

    let page_number = page
        .get("pageNumber")
        .and_then(JsonValue::as_u64)
        .unwrap_or(0);
    let page_count = page
        .get("pageCount")
        .and_then(JsonValue::as_u64)
        .unwrap_or(0);

    if page_number > 0 && page_count > 0 && page_number < page_count {
        return Continuation::NextPage;
    }

    Continuation::Done
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_continuation_cursor_wins_over_page_count() {
        // Cursor-paged endpoints are not expected to supply a usable
        // pageCount, but if one does, the cursor takes precedence.
        let page = json!({"cursor": "c1", "pageNumber": 1, "pageCount": 5});
        assert_eq!(continuation(&page), Continuation::Cursor("c1".to_string()));
    }

    #[test]
    fn test_continuation_empty_cursor_falls_through() {
        let page = json!({"cursor": "", "pageNumber": 1, "pageCount": 2});
        assert_eq!(continuation(&page), Continuation::NextPage);
    }

    #[test]
    fn test_continuation_page_based() {
        assert_eq!(
            continuation(&json!({"pageNumber": 1, "pageCount": 3})),
            Continuation::NextPage
        );
        assert_eq!(
            continuation(&json!({"pageNumber": 3, "pageCount": 3})),
            Continuation::Done
        );
    }

    #[test]
    fn test_continuation_zero_or_missing_hints_stop() {
        assert_eq!(continuation(&json!({})), Continuation::Done);
        assert_eq!(
            continuation(&json!({"pageNumber": 1, "pageCount": 0})),
            Continuation::Done
        );
        assert_eq!(
            continuation(&json!({"pageNumber": 0, "pageCount": 4})),
            Continuation::Done
        );
        assert_eq!(continuation(&json!({"pageNumber": 2})), Continuation::Done);
    }

    #[test]
    fn test_build_page_request_query_location() {
        let body = json!({});
        let mut query = JsonObject::new();
        query.insert("state".to_string(), json!("active"));

        let state = PaginationState::new();
        let (req_body, req_query) =
            build_page_request(&body, &query, &state, PaginationLocation::Query);

        assert_eq!(req_body, json!({}));
        assert_eq!(req_query.get("state"), Some(&json!("active")));
        assert_eq!(req_query.get("pageNumber"), Some(&json!(1)));
        // Original query untouched
        assert!(!query.contains_key("pageNumber"));
    }

    #[test]
    fn test_build_page_request_body_location() {
        let body = json!({"interval": "2024-01-01T00:00:00Z/2024-01-31T23:59:59Z"});
        let query = JsonObject::new();

        let mut state = PaginationState::new();
        state.next_page();
        let (req_body, req_query) =
            build_page_request(&body, &query, &state, PaginationLocation::Body);

        assert_eq!(
            req_body,
            json!({
                "interval": "2024-01-01T00:00:00Z/2024-01-31T23:59:59Z",
                "paging": {"pageSize": 25, "pageNumber": 2}
            })
        );
        assert!(req_query.is_empty());
        // Original body untouched
        assert_eq!(
            body,
            json!({"interval": "2024-01-01T00:00:00Z/2024-01-31T23:59:59Z"})
        );
    }

    #[test]
    fn test_build_page_request_cursor_resets_body() {
        let body = json!({"interval": "x/y"});
        let query = JsonObject::new();

        let mut state = PaginationState::new();
        state.set_cursor("c-9");
        let (req_body, req_query) =
            build_page_request(&body, &query, &state, PaginationLocation::Body);

        // Cursor rides in the query and the body reverts to the original,
        // without a paging object.
        assert_eq!(req_body, json!({"interval": "x/y"}));
        assert_eq!(req_query.get("cursor"), Some(&json!("c-9")));
    }

    #[test]
    fn test_pagination_state_defaults() {
        let state = PaginationState::default();
        assert_eq!(state.page_number, 1);
        assert!(state.cursor.is_none());
    }
}
