//! Integration Tests for the Proxy Endpoint
//!
//! Drives the full router against a mocked upstream.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use omdb_cache_proxy::{
    cache::{CacheKey, ResponseCache},
    create_router,
    upstream::OmdbClient,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_API_KEY: &str = "test_key";

// == Helper Functions ==

fn create_test_state(mock_server: &MockServer) -> AppState {
    AppState::new(
        ResponseCache::new(),
        OmdbClient::new(mock_server.uri(), TEST_API_KEY),
    )
}

async fn send_get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upstream_calls(mock_server: &MockServer) -> usize {
    mock_server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

// == Cache Hit / Miss ==

#[tokio::test]
async fn test_second_request_served_from_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("t", "batman"))
        .and(query_param("apikey", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Title": "Batman"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = create_test_state(&mock_server);
    let app = create_router(state.clone());

    let first = send_get(&app, "/?t=batman").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_to_json(first.into_body()).await, json!({"Title": "Batman"}));

    let second = send_get(&app, "/?t=batman").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        second.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(body_to_json(second.into_body()).await, json!({"Title": "Batman"}));

    assert_eq!(upstream_calls(&mock_server).await, 1);

    let stats = state.cache.read().await.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.total_entries, 1);
}

#[tokio::test]
async fn test_keys_are_case_sensitive() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("t", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Title": "batman"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("t", "Batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Title": "Batman"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = create_test_state(&mock_server);
    let app = create_router(state.clone());

    let lower = send_get(&app, "/?t=batman").await;
    assert_eq!(body_to_json(lower.into_body()).await["Title"], "batman");
    let upper = send_get(&app, "/?t=Batman").await;
    assert_eq!(body_to_json(upper.into_body()).await["Title"], "Batman");

    assert_eq!(upstream_calls(&mock_server).await, 2);

    let cache = state.cache.read().await;
    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&CacheKey::from("/?t=batman")));
    assert!(cache.contains(&CacheKey::from("/?t=Batman")));
}

#[tokio::test]
async fn test_parameter_order_not_normalized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("t", "batman"))
        .and(query_param("y", "1989"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Year": "1989"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let app = create_router(create_test_state(&mock_server));

    send_get(&app, "/?t=batman&y=1989").await;
    send_get(&app, "/?y=1989&t=batman").await;
    send_get(&app, "/?t=batman&y=1989").await;

    assert_eq!(upstream_calls(&mock_server).await, 2);
}

#[tokio::test]
async fn test_request_without_query_still_sends_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", TEST_API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "False", "Error": "Incorrect IMDb ID."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_router(create_test_state(&mock_server));

    let response = send_get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["Response"], "False");
}

// == Upstream Status Handling ==

#[tokio::test]
async fn test_upstream_not_found_returns_ok_with_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("t", "nosuchmovie"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"Response": "False", "Error": "Movie not found!"})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let state = create_test_state(&mock_server);
    let app = create_router(state.clone());

    let response = send_get(&app, "/?t=nosuchmovie").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["Error"], "Movie not found!");

    // Non-2xx bodies are relayed but not cached
    let again = send_get(&app, "/?t=nosuchmovie").await;
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(upstream_calls(&mock_server).await, 2);
    assert!(state.cache.read().await.is_empty());
}

#[tokio::test]
async fn test_upstream_unreachable_returns_bad_gateway() {
    let state = AppState::new(
        ResponseCache::new(),
        OmdbClient::new("http://127.0.0.1:1", TEST_API_KEY),
    );
    let app = create_router(state.clone());

    let response = send_get(&app, "/?t=batman").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_to_json(response.into_body()).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Upstream request failed"));
    assert!(!message.contains(TEST_API_KEY));
    assert!(state.cache.read().await.is_empty());
}

// == Concurrency ==

#[tokio::test]
async fn test_concurrent_misses_are_not_deduplicated() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("t", "alien"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Title": "Alien"}))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let state = create_test_state(&mock_server);
    let app = create_router(state.clone());

    let (a, b) = tokio::join!(send_get(&app, "/?t=alien"), send_get(&app, "/?t=alien"));
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let stats = state.cache.read().await.stats();
    assert_eq!(stats.stores, 2);
    assert_eq!(stats.overwrites, 1);
    assert_eq!(stats.total_entries, 1);
}
