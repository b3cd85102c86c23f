use crate::{DraftBatch, GenerateError, Generator, InputSource, TrendDigest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    generator: Arc<Generator>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    posts: Option<String>,
    input_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    drafts: DraftBatch,
    trending_topics: TrendDigest,
    api_used: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeProfileBody {
    linkedin_url: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeProfileResponse {
    success: bool,
    message: String,
    details: String,
    suggestion: String,
}

/// Routes for the generation API. Each route is also served under `/api`.
pub fn router(generator: Arc<Generator>) -> Router {
    let generate = post(generate_handler).fallback(method_not_allowed);
    let analyze_profile = post(analyze_profile_handler).fallback(method_not_allowed);

    Router::new()
        .route("/", get(home_handler))
        .route("/generate", generate.clone())
        .route("/api/generate", generate)
        .route("/analyze-profile", analyze_profile.clone())
        .route("/api/analyze-profile", analyze_profile)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { generator })
}

async fn home_handler() -> &'static str {
    "postdraft server. POST /generate with {\"posts\": \"1--> ...\"}"
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn generate_handler(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let posts = body.posts.unwrap_or_default();
    let input_source = InputSource::from_label(body.input_type.as_deref());

    match state.generator.generate(&posts, input_source).await {
        Ok(result) => Json(GenerateResponse {
            success: true,
            drafts: result.drafts,
            trending_topics: result.trend_digest,
            api_used: result.provider_used,
        })
        .into_response(),
        Err(error) => {
            log_failure(&error, "generation failed");
            failure_response(&error, "Failed to generate posts")
        }
    }
}

async fn analyze_profile_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeProfileBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let linkedin_url = body.linkedin_url.unwrap_or_default();

    match state.generator.analyze_profile(&linkedin_url).await {
        Ok(analysis) => Json(AnalyzeProfileResponse {
            success: true,
            message: analysis.message,
            details: analysis.details,
            suggestion: analysis.suggestion,
        })
        .into_response(),
        Err(error) => {
            log_failure(&error, "profile analysis failed");
            match &error {
                // A missing provider is just another downstream failure here.
                GenerateError::NoProviderAvailable { setup } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to analyze profile",
                        "details": error.to_string(),
                        "setup": setup,
                    })),
                )
                    .into_response(),
                _ => failure_response(&error, "Failed to analyze profile"),
            }
        }
    }
}

fn log_failure(error: &GenerateError, message: &str) {
    if error.is_client_error() {
        tracing::debug!(%error, "{message}");
    } else {
        tracing::error!(%error, "{message}");
    }
}

/// Map a pipeline error onto the status and body the client expects.
fn failure_response(error: &GenerateError, failure_message: &str) -> Response {
    match error {
        GenerateError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        GenerateError::NoProviderAvailable { setup } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error.to_string(), "setup": setup })),
        )
            .into_response(),
        GenerateError::Provider(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": failure_message, "details": error.to_string() })),
        )
            .into_response(),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
