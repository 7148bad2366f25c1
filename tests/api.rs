//! End-to-end tests for the HTTP surface against a mocked shopping site

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use price_lookup::config::Settings;
use price_lookup::web::{create_router, AppState, JSON_UTF8};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<!doctype html>
<html><body><div class="s-main-slot s-result-list">
  <div data-component-type="s-search-result" data-asin="B0AD">
    <span class="s-card-container">スポンサー</span>
    <span class="a-text-normal">Sponsored Gadget</span>
    <span class="a-price-whole">99</span>
    <img class="s-image" src="https://example/ad.jpg">
  </div>
  <div data-component-type="s-search-result" data-asin="B0PARTIAL">
    <span class="a-text-normal">Gadget without price</span>
    <img class="s-image" src="https://example/partial.jpg">
  </div>
  <div data-component-type="s-search-result" data-asin="B0WIDGET">
    <h2><a href="/dp/B0WIDGET"><span class="a-size-medium a-text-normal">Widget</span></a></h2>
    <span class="a-price"><span class="a-price-whole">1,980</span></span>
    <img class="s-image" src="https://example/img.jpg">
  </div>
</div></body></html>"#;

async fn app_for(server: &MockServer) -> Router {
    let mut settings = Settings::default();
    settings.site.search_url = format!("{}/s?k={{query}}", server.uri());
    settings.outgoing.request_timeout = 2.0;
    create_router(AppState::new(&settings).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_get_price_returns_first_organic_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "widget"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let (status, content_type, body) = get(app_for(&server).await, "/get-price?query=widget").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(
        body,
        json!({"title": "Widget", "price": "¥1,980", "image_url": "https://example/img.jpg"})
    );
}

#[tokio::test]
async fn test_missing_query_is_400() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(&server).await;
    let (status, _, body) = get(app.clone(), "/get-price").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Query parameter is missing"}));

    let (status, _, body) = get(app, "/get-price?query=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Query parameter is missing"}));
}

#[tokio::test]
async fn test_upstream_503_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server).await, "/get-price?query=widget").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Could not fetch the search results page");
    assert_eq!(body["detail"], "upstream returned status 503");
}

#[tokio::test]
async fn test_all_sponsored_is_500() {
    let server = MockServer::start().await;
    let page = r#"<html><body>
        <div data-component-type="s-search-result">
            <span class="s-card-container"></span>
            <span class="a-text-normal">Ad</span>
            <span class="a-price-whole">1</span>
            <img class="s-image" src="https://example/ad.jpg">
        </div>
    </body></html>"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server).await, "/get-price?query=ad").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Could not find a non-sponsored product"}));
}

#[tokio::test]
async fn test_query_is_encoded_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "sony wf-1000xm3&case"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, _) = get(
        app_for(&server).await,
        "/get-price?query=sony%20wf-1000xm3%26case",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, _, body) = get(app_for(&server).await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], price_lookup::VERSION);
}

#[tokio::test]
async fn test_repeated_query_uses_first_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let (status, content_type, body) = get(app_for(&server).await, "/get-price?query=a&query=b").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(body["title"], "Widget");
}

#[tokio::test]
async fn test_unrelated_params_only_is_400() {
    let server = MockServer::start().await;
    let (status, content_type, body) = get(app_for(&server).await, "/get-price?q=widget&page=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some(JSON_UTF8));
    assert_eq!(body, json!({"error": "Query parameter is missing"}));
}

#[test]
fn test_invalid_timeout_setting_is_an_error() {
    let settings = Settings::from_yaml("outgoing:\n  request_timeout: -1\n").unwrap();
    assert!(AppState::new(&settings).is_err());
}
