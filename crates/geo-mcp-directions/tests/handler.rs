//! End-to-end handler tests against a mock Google Maps upstream.
//!
//! Requests go through `handle_message`, the same entry point the stdio loop
//! uses, so these cover decoding, dispatch, the upstream call, and the
//! result/error envelopes.

use geo_mcp_directions::{DirectionsConfig, DirectionsServer};
use geo_mcp_shared::error::codes;
use geo_mcp_shared::handle_message;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(mock: &MockServer) -> DirectionsServer {
    DirectionsServer::new(DirectionsConfig::new("test-key").with_base_url(mock.uri()))
        .expect("server builds")
}

fn request(id: i64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

#[tokio::test]
async fn test_get_directions_defaults_mode_and_sends_key() {
    let mock = MockServer::start().await;
    let upstream = json!({"status": "OK", "routes": [{"summary": "Tokaido Shinkansen"}]});
    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .and(query_param("origin", "Tokyo, Japan"))
        .and(query_param("destination", "Osaka, Japan"))
        .and(query_param("mode", "driving"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let response = handle_message(
        &server,
        request(
            1,
            "tools/call",
            json!({
                "name": "get_directions",
                "arguments": {"origin": "Tokyo, Japan", "destination": "Osaka, Japan"}
            }),
        ),
    )
    .await
    .expect("response");

    let result = response.result.expect("tool result");
    assert_eq!(result["isError"], false);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert_eq!(text, serde_json::to_string_pretty(&upstream).unwrap());
}

#[tokio::test]
async fn test_upstream_403_becomes_error_result() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error_message": "key invalid"})),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let response = handle_message(
        &server,
        request(
            2,
            "tools/call",
            json!({
                "name": "get_directions",
                "arguments": {"origin": "Tokyo, Japan", "destination": "Osaka, Japan"}
            }),
        ),
    )
    .await
    .expect("response");

    assert!(response.error.is_none());
    assert_eq!(
        response.result.unwrap(),
        json!({
            "content": [{"type": "text", "text": "Google Maps API error: key invalid"}],
            "isError": true
        })
    );
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_upstream() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for arguments in [json!(null), json!({"origin": "Tokyo"}), json!({"origin": 1, "destination": "b"})] {
        let response = handle_message(
            &server,
            request(3, "tools/call", json!({"name": "get_directions", "arguments": arguments})),
        )
        .await
        .expect("response");
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);
    }

    let response = handle_message(
        &server,
        request(4, "tools/call", json!({"name": "bogus_tool", "arguments": {}})),
    )
    .await
    .expect("response");
    assert_eq!(response.error.unwrap().code, codes::METHOD_NOT_FOUND);
}

#[tokio::test]
async fn test_resource_read_resolves_segments_without_mode() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .and(query_param("origin", "Tokyo"))
        .and(query_param("destination", "Osaka"))
        .and(query_param_is_missing("mode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let response = handle_message(
        &server,
        request(5, "resources/read", json!({"uri": "directions://Tokyo/Osaka"})),
    )
    .await
    .expect("response");

    let result = response.result.expect("read result");
    let contents = &result["contents"][0];
    assert_eq!(contents["uri"], "directions://Tokyo/Osaka");
    assert_eq!(contents["mimeType"], "application/json");
    let body: Value = serde_json::from_str(contents["text"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"status": "OK"}));
}

#[tokio::test]
async fn test_resource_read_upstream_failure_is_internal_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error_message": "key invalid"})),
        )
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let response = handle_message(
        &server,
        request(6, "resources/read", json!({"uri": "directions://Tokyo/Osaka"})),
    )
    .await
    .expect("response");

    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, codes::INTERNAL_ERROR);
    assert_eq!(error.message, "Google Maps API error: key invalid");
}

#[tokio::test]
async fn test_resource_read_rejects_malformed_uri() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);
    let response = handle_message(
        &server,
        request(7, "resources/read", json!({"uri": "directions://Tokyo"})),
    )
    .await
    .expect("response");
    assert_eq!(response.error.unwrap().code, codes::INVALID_REQUEST);
}

#[tokio::test]
async fn test_resource_catalogs() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let response = handle_message(&server, request(8, "resources/list", json!({})))
        .await
        .expect("response");
    let resources = response.result.unwrap()["resources"].clone();
    assert_eq!(resources.as_array().unwrap().len(), 1);

    let response = handle_message(&server, request(9, "resources/templates/list", json!({})))
        .await
        .expect("response");
    assert_eq!(
        response.result.unwrap()["resourceTemplates"][0]["uriTemplate"],
        "directions://{origin}/{destination}"
    );
}

#[tokio::test]
async fn test_connection_failure_does_not_expose_api_key() {
    // Nothing listens on the discard port
    let server = DirectionsServer::new(
        DirectionsConfig::new("SUPERSECRETKEY").with_base_url("http://127.0.0.1:9"),
    )
    .expect("server builds");

    let response = handle_message(
        &server,
        request(
            10,
            "tools/call",
            json!({"name": "get_directions", "arguments": {"origin": "a", "destination": "b"}}),
        ),
    )
    .await
    .expect("response");
    let result = response.result.expect("tool result");
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Google Maps API error: "), "{}", text);
    assert!(!text.contains("SUPERSECRETKEY"), "{}", text);

    let response = handle_message(
        &server,
        request(11, "resources/read", json!({"uri": "directions://a/b"})),
    )
    .await
    .expect("response");
    let error = response.error.expect("protocol error");
    assert_eq!(error.code, codes::INTERNAL_ERROR);
    assert!(!error.message.contains("SUPERSECRETKEY"), "{}", error.message);
}
