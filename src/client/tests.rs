//! Tests for the Platform API client

use super::*;
use crate::auth::Authenticator;
use crate::config::{ConnectorConfig, Credentials, Region};
use crate::error::Error;
use crate::types::{JsonObject, Method, PaginationLocation};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::matchers::query_param_is_missing;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GenesysClient {
    GenesysClient::with_parts(server.uri(), Authenticator::static_token("token-123"))
}

fn empty_query() -> JsonObject {
    JsonObject::new()
}

// ============================================================================
// Request Primitive
// ============================================================================

#[test]
fn test_base_url_derived_from_region() {
    let config = ConnectorConfig {
        credentials: Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            region: Region::new(Region::EU_IRELAND),
        },
        continue_on_fail: false,
    };

    let client = GenesysClient::new(&config);
    assert_eq!(client.base_url(), "https://api.mypurecloud.ie");
}

#[tokio::test]
async fn test_request_sends_json_content_type_and_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tokens/me"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "me"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .request(Method::GET, "/api/v2/tokens/me", &json!({}), &empty_query())
        .await
        .unwrap();

    assert_eq!(result, json!({"name": "me"}));
}

#[tokio::test]
async fn test_request_omits_empty_body_and_query() {
    let mock_server = MockServer::start().await;

    // An empty body map must not be serialized as `{}`
    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(body_string(String::new()))
        .and(query_param_is_missing("pageNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entities": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client
        .request(Method::GET, "/api/v2/users", &json!({}), &empty_query())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_sends_body_and_query_when_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/routing/queues"))
        .and(query_param("validate", "true"))
        .and(body_json(json!({"name": "Support"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "q-1", "name": "Support"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = JsonObject::new();
    query.insert("validate".to_string(), json!(true));

    let client = test_client(&mock_server);
    let result = client
        .request(
            Method::POST,
            "/api/v2/routing/queues",
            &json!({"name": "Support"}),
            &query,
        )
        .await
        .unwrap();

    assert_eq!(result["id"], "q-1");
}

#[tokio::test]
async fn test_request_array_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/routing/queues/q-1/members"))
        .and(body_json(json!([{"id": "u-1"}, {"id": "u-2"}])))
        .respond_with(ResponseTemplate::new(200).set_body_string(String::new()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .request(
            Method::POST,
            "/api/v2/routing/queues/q-1/members",
            &json!([{"id": "u-1"}, {"id": "u-2"}]),
            &empty_query(),
        )
        .await
        .unwrap();

    // Empty response body decodes to null
    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_request_wraps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .request(Method::GET, "/api/v2/users/missing", &json!({}), &empty_query())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert!(err.to_string().contains("404"));
}

// ============================================================================
// Pagination Engine
// ============================================================================

#[tokio::test]
async fn test_page_number_walk_issues_one_request_per_page() {
    let mock_server = MockServer::start().await;

    for page in 1..=3u64 {
        let entities: Vec<Value> = vec![json!({"id": page})];
        Mock::given(method("GET"))
            .and(path("/api/v2/groups"))
            .and(query_param("pageNumber", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entities": entities,
                "pageNumber": page,
                "pageCount": 3
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/groups",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[tokio::test]
async fn test_two_page_walk_request_for_request() {
    // GET /x with pages {entities:[1,2], pageNumber:1, pageCount:2} then
    // {entities:[3], pageNumber:2, pageCount:2}: exactly two transport
    // calls, pageNumber=1 then pageNumber=2, concatenated in page order.
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": 1}, {"id": 2}],
            "pageNumber": 1,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": 3}],
            "pageNumber": 2,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/x",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[tokio::test]
async fn test_cursor_walk() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/analytics/jobs"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": "a"}],
            "cursor": "c1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Cursor continuation carries the cursor in the query and drops the
    // derived pageNumber.
    Mock::given(method("GET"))
        .and(path("/api/v2/analytics/jobs"))
        .and(query_param("cursor", "c1"))
        .and(query_param_is_missing("pageNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": "b"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/analytics/jobs",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": "a"}), json!({"id": "b"})]);
}

#[tokio::test]
async fn test_limit_truncates_and_stops_fetching() {
    let mock_server = MockServer::start().await;

    // Every page advertises more data; only the limit can stop the walk.
    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": 1}, {"id": 2}],
            "cursor": "more"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("cursor", "more"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": 3}, {"id": 4}],
            "cursor": "more"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/users",
            &json!({}),
            &empty_query(),
            3,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    // Exactly three items, two pages fetched, not three
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[tokio::test]
async fn test_body_pagination_rebuilds_from_original_body() {
    let mock_server = MockServer::start().await;

    let interval = "2024-01-01T00:00:00Z/2024-01-31T23:59:59Z";

    Mock::given(method("POST"))
        .and(path("/api/v2/analytics/conversations/details/query"))
        .and(body_json(json!({
            "interval": interval,
            "paging": {"pageSize": 25, "pageNumber": 1}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [{"conversationId": "c-1"}],
            "pageNumber": 1,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2's body is exactly the original plus the new paging token:
    // nothing residual from page 1's derived request.
    Mock::given(method("POST"))
        .and(path("/api/v2/analytics/conversations/details/query"))
        .and(body_json(json!({
            "interval": interval,
            "paging": {"pageSize": 25, "pageNumber": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [{"conversationId": "c-2"}],
            "pageNumber": 2,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "conversations",
            Method::POST,
            "/api/v2/analytics/conversations/details/query",
            &json!({"interval": interval}),
            &empty_query(),
            0,
            PaginationLocation::Body,
        )
        .await
        .unwrap();

    assert_eq!(
        items,
        vec![json!({"conversationId": "c-1"}), json!({"conversationId": "c-2"})]
    );
}

#[tokio::test]
async fn test_missing_items_field_does_not_stop_iteration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageNumber": 1,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": "late"}],
            "pageNumber": 2,
            "pageCount": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/users",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": "late"})]);
}

#[tokio::test]
async fn test_non_array_items_field_contributes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": "not-an-array"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/users",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_caller_query_preserved_on_every_page() {
    let mock_server = MockServer::start().await;

    for page in 1..=2u64 {
        Mock::given(method("GET"))
            .and(path("/api/v2/users"))
            .and(query_param("state", "active"))
            .and(query_param("pageNumber", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entities": [{"page": page}],
                "pageNumber": page,
                "pageCount": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let mut query = JsonObject::new();
    query.insert("state".to_string(), json!("active"));

    let client = test_client(&mock_server);
    let items = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/users",
            &json!({}),
            &query,
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    // The caller's map was not mutated by the walk
    assert_eq!(query.len(), 1);
}

#[tokio::test]
async fn test_pagination_propagates_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": 1}],
            "pageNumber": 1,
            "pageCount": 2
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .request_all_items(
            "entities",
            Method::GET,
            "/api/v2/users",
            &json!({}),
            &empty_query(),
            0,
            PaginationLocation::Query,
        )
        .await
        .unwrap_err();

    // No partial results: the fetch aborts with the page-2 failure
    assert!(matches!(err, Error::Api { .. }));
    assert!(err.to_string().contains("500"));
}
