mod common;

use std::sync::Arc;

use anirec::{
    api::{create_router, AppState},
    db::{MemorySearchTermStore, SearchTermStore},
    services::AnimeProvider,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{entry, mock_provider, naruto_provider, MockProvider};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<MemorySearchTermStore>,
}

fn create_test_app(provider: MockProvider) -> TestApp {
    let store = Arc::new(MemorySearchTermStore::new());
    let provider: Arc<dyn AnimeProvider> = Arc::new(provider);
    let state = AppState::new(provider, store.clone());
    TestApp {
        router: create_router(state),
        store,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(mock_provider());
    let (status, body) = send(&app.router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = create_test_app(mock_provider());

    let response = app.router.clone().oneshot(get("/health")).await.unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn test_index_prefills_stored_term() {
    let app = create_test_app(mock_provider());
    app.store.save("Cowboy Bebop").await.unwrap();

    let (status, body) = send(&app.router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Cowboy Bebop\""));
    assert!(body.contains("<option value='recCountHighToLow' selected>"));
}

#[tokio::test]
async fn test_search_renders_results_and_status() {
    let app = create_test_app(naruto_provider());

    let (status, body) = send(
        &app.router,
        post_form("/search", "term=Naruto&limit=3&sort=recCountHighToLow"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<b>Success!</b>"));
    assert!(body.contains("Here are 3 Recommendations based on the title you entered:"));
    assert_eq!(body.matches("<div class='result'>").count(), 3);
    let (a, e, b) = (
        body.find("Recommendation Count: 50").unwrap(),
        body.find("Recommendation Count: 30").unwrap(),
        body.find("Recommendation Count: 10").unwrap(),
    );
    assert!(a < e && e < b);
    assert_eq!(
        app.store.load().await.unwrap(),
        Some("Naruto".to_string())
    );
}

#[tokio::test]
async fn test_sort_change_does_not_refetch() {
    // naruto_provider allows exactly one call per endpoint
    let app = create_test_app(naruto_provider());

    send(&app.router, post_form("/search", "term=Naruto&limit=3")).await;

    let (status, body) = send(&app.router, get("/?sort=ABC")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<option value='ABC' selected>"));
    let (a, b, e) = (
        body.find(">A</a>").unwrap(),
        body.find(">B</a>").unwrap(),
        body.find(">E</a>").unwrap(),
    );
    assert!(a < b && b < e);

    let (status, fragment) = send(&app.router, get("/results?sort=reverseABC")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fragment.find(">E</a>").unwrap() < fragment.find(">A</a>").unwrap());

    let (_, fragment) = send(&app.router, get("/results?sort=recCountLowToHigh")).await;
    assert!(
        fragment.find("Recommendation Count: 10").unwrap()
            < fragment.find("Recommendation Count: 50").unwrap()
    );
}

#[tokio::test]
async fn test_sort_change_keeps_submitted_limit() {
    let app = create_test_app(naruto_provider());

    let (_, body) = send(&app.router, get("/")).await;
    assert!(body.contains("id=\"limit\" name=\"limit\" type=\"number\" min=\"1\" value=\"10\""));

    send(&app.router, post_form("/search", "term=Naruto&limit=3")).await;

    let (_, body) = send(&app.router, get("/?sort=reverseABC")).await;
    assert!(body.contains("id=\"limit\" name=\"limit\" type=\"number\" min=\"1\" value=\"3\""));
}

#[tokio::test]
async fn test_blank_search_is_a_no_op() {
    let mut provider = mock_provider();
    provider.expect_search_anime().times(0);
    provider.expect_fetch_recommendations().times(0);
    let app = create_test_app(provider);

    let (status, body) = send(&app.router, post_form("/search", "term=++++&limit=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div id=\"status\"></div>"));
    assert!(body.contains("<div id=\"content\"></div>"));
}

#[tokio::test]
async fn test_invalid_limit_is_reported() {
    let mut provider = mock_provider();
    provider.expect_search_anime().times(0);
    let app = create_test_app(provider);

    let (status, body) = send(&app.router, post_form("/search", "term=Naruto&limit=lots")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Limit must be a positive whole number"));
}

#[tokio::test]
async fn test_no_results_status() {
    let mut provider = mock_provider();
    provider
        .expect_search_anime()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    provider.expect_fetch_recommendations().times(0);
    let app = create_test_app(provider);

    let (status, body) = send(&app.router, post_form("/search", "term=qwertyuiop&limit=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<b>No results found for &#x27;qwertyuiop&#x27;</b>"));
    assert!(!body.contains("class='result'"));
}

#[tokio::test]
async fn test_new_search_replaces_previous_results() {
    let mut provider = naruto_provider();
    provider
        .expect_search_anime()
        .withf(|query, _| query.encoded() == "Oshi%20no%20Ko")
        .times(1)
        .returning(|_, _| Ok(vec![entry(52034, "Oshi no Ko")]));
    provider
        .expect_fetch_recommendations()
        .withf(|id| *id == 52034)
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let app = create_test_app(provider);

    send(&app.router, post_form("/search", "term=Naruto&limit=3")).await;
    let (_, body) = send(&app.router, post_form("/search", "term=Oshi+no+Ko&limit=3")).await;

    assert!(body.contains("No recommendations found for &#x27;Oshi no Ko&#x27;"));
    assert!(!body.contains("class='result'"));
    assert!(!body.contains("Here are"));
}

#[tokio::test]
async fn test_last_search_endpoint_persists_term() {
    let app = create_test_app(mock_provider());

    let (status, _) = send(&app.router, post_form("/last-search", "term=Mob+Psycho+100")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.store.load().await.unwrap(),
        Some("Mob Psycho 100".to_string())
    );
}

#[tokio::test]
async fn test_api_recommendations_json() {
    let app = create_test_app(naruto_provider());

    let (status, body) = send(
        &app.router,
        get("/api/v1/recommendations?q=Naruto&limit=3&sort=ABC"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["query"], "Naruto");
    assert_eq!(json["sort"], "ABC");
    assert_eq!(json["source"]["mal_id"], 20);
    assert_eq!(json["count"], 3);
    let titles: Vec<&str> = json["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["entry"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "B", "E"]);
}

#[tokio::test]
async fn test_api_rejects_empty_query_and_bad_sort() {
    let app = create_test_app(mock_provider());

    let (status, body) = send(&app.router, get("/api/v1/recommendations?q=%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Search query cannot be empty");

    let (status, _) = send(&app.router, get("/api/v1/recommendations?q=Naruto&sort=newest")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_upstream_failure_is_bad_gateway() {
    let mut provider = mock_provider();
    provider.expect_search_anime().times(1).returning(|_, _| {
        Err(anirec::error::AppError::MalformedResponse(
            "Failed to parse Jikan response".to_string(),
        ))
    });
    let app = create_test_app(provider);

    let (status, _) = send(&app.router, get("/api/v1/recommendations?q=Naruto")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
