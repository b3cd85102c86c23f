mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{generator_with, CountingTrendSource, TRENDS};
use postdraft::server;
use postdraft_sdk::{sdk_test::MockLanguageModel, LanguageModelError, ModelResponse};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(model: Option<&Arc<MockLanguageModel>>, trends: &Arc<CountingTrendSource>) -> Router {
    server::router(Arc::new(generator_with(model, trends)))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, Body::from))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body.to_string())).await
}

#[tokio::test]
async fn generate_returns_three_drafts() {
    let model = Arc::new(MockLanguageModel::new().with_label("Groq (Mixtral-8x7b)"));
    model.enqueue_generate(ModelResponse::text(
        r#"Here you go: [{"title":"A","content":"B"}]"#,
    ));
    let trends = CountingTrendSource::new();

    let (status, body) = post_json(
        app(Some(&model), &trends),
        "/api/generate",
        json!({ "posts": "1--> I love building software.", "inputType": "paste" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["drafts"].as_array().unwrap().len(), 3);
    assert_eq!(body["drafts"][0], json!({ "title": "A", "content": "B" }));
    assert_eq!(body["trendingTopics"], json!(TRENDS));
    assert_eq!(body["apiUsed"], json!("Groq (Mixtral-8x7b)"));
}

#[tokio::test]
async fn empty_posts_are_rejected_without_network_calls() {
    let model = Arc::new(MockLanguageModel::new());
    let trends = CountingTrendSource::new();

    for body in [json!({ "posts": "   " }), json!({ "inputType": "paste" })] {
        let (status, body) = post_json(app(Some(&model), &trends), "/generate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Posts content is required" }));
    }

    assert_eq!(trends.calls(), 0);
    assert!(model.tracked_generate_inputs().is_empty());
}

#[tokio::test]
async fn missing_credentials_return_setup_instructions() {
    let trends = CountingTrendSource::new();

    let (status, body) = post_json(
        app(None, &trends),
        "/generate",
        json!({ "posts": "1--> Hello world 2--> Second post", "inputType": "paste" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("No API key configured"));
    assert!(body["setup"].as_str().unwrap().contains("GROQ_API_KEY"));
}

#[tokio::test]
async fn provider_errors_are_reported_with_details() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(LanguageModelError::Invariant(
        "mock",
        "connection reset by peer".to_string(),
    ));
    let trends = CountingTrendSource::new();

    let (status, body) = post_json(
        app(Some(&model), &trends),
        "/generate",
        json!({ "posts": "1--> A post" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Failed to generate posts"));
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("connection reset by peer"));
    assert!(body.get("drafts").is_none());
    assert!(body.get("trendingTopics").is_none());
}

#[tokio::test]
async fn non_post_methods_are_not_allowed() {
    let trends = CountingTrendSource::new();

    for uri in ["/generate", "/analyze-profile"] {
        let (status, body) = send(app(None, &trends), "GET", uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let trends = CountingTrendSource::new();

    let (status, body) = send(
        app(None, &trends),
        "POST",
        "/generate",
        Some("{not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_profile_recommends_pasting_posts() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse::text("{\"message\": \"Thanks!\"}"));
    let trends = CountingTrendSource::new();

    let (status, body) = post_json(
        app(Some(&model), &trends),
        "/analyze-profile",
        json!({ "linkedinUrl": "https://www.linkedin.com/in/someone" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "LinkedIn profile analysis requires manual post input",
            "details": "{\"message\": \"Thanks!\"}",
            "suggestion": "Please paste 3-5 of your recent LinkedIn posts to analyze your style",
        })
    );
}

#[tokio::test]
async fn analyze_profile_errors() {
    let trends = CountingTrendSource::new();

    let (status, body) = post_json(app(None, &trends), "/api/analyze-profile", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "LinkedIn URL is required" }));

    let (status, body) = post_json(
        app(None, &trends),
        "/api/analyze-profile",
        json!({ "linkedinUrl": "https://www.linkedin.com/in/someone" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Failed to analyze profile"));
    assert!(body["details"].is_string());

    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(LanguageModelError::Invariant("mock", "boom".to_string()));
    let (status, body) = post_json(
        app(Some(&model), &trends),
        "/analyze-profile",
        json!({ "linkedinUrl": "https://www.linkedin.com/in/someone" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Failed to analyze profile"));
    assert!(body["details"].as_str().unwrap().contains("boom"));
}
