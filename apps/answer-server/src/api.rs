//! API handlers for the answer server
//!
//! Provides REST endpoints for:
//! - Primary answers (`POST /api/answer`)
//! - Vendor-voice fallback answers (`POST /api/ask-fallback`)
//! - Catalog listing and health

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shared_types::RecordSummary;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Value of `metadata.source` in fallback responses
pub const FALLBACK_SOURCE: &str = "fallback";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub records: usize,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "answer-server",
        version: env!("CARGO_PKG_VERSION"),
        records: state.engine.catalog().len(),
    })
}

/// Catalog listing response
#[derive(Serialize)]
pub struct RecordListResponse {
    pub success: bool,
    pub records: Vec<RecordSummary>,
    pub count: usize,
}

/// Handler: GET /api/records
pub async fn handle_list_records(State(state): State<AppState>) -> Json<RecordListResponse> {
    let records: Vec<RecordSummary> = state
        .engine
        .catalog()
        .records()
        .iter()
        .map(RecordSummary::from)
        .collect();
    let count = records.len();

    Json(RecordListResponse {
        success: true,
        records,
        count,
    })
}

/// Question request body shared by both answer endpoints
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

impl AskRequest {
    /// Parse a raw body. Malformed JSON is an internal error, not a 4xx,
    /// and a missing or blank question is rejected before any matching.
    pub fn parse(body: &[u8]) -> Result<String, ServerError> {
        let request: AskRequest = serde_json::from_slice(body)?;
        request
            .question
            .filter(|q| !q.trim().is_empty())
            .ok_or(ServerError::MissingQuestion)
    }
}

/// Primary answer response
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
    pub timestamp: String,
}

/// Handler: POST /api/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnswerResponse>, ServerError> {
    let question = AskRequest::parse(&body)?;
    info!("Answer request: {} chars", question.len());
    log_scores(&state, &question);

    let answer = state.engine.answer(&question, &state.answer_options);
    debug!("Answer sources: {:?}", answer.sources);

    Ok(Json(AnswerResponse {
        question,
        answer: answer.text,
        timestamp: timestamp(),
    }))
}

/// Fallback answer metadata
#[derive(Debug, Serialize)]
pub struct FallbackMetadata {
    pub source: &'static str,
    pub relevant_sources: Vec<String>,
    pub timestamp: String,
}

/// Fallback answer response
#[derive(Debug, Serialize)]
pub struct FallbackResponse {
    pub answer: String,
    pub metadata: FallbackMetadata,
}

/// Handler: POST /api/ask-fallback
pub async fn handle_ask_fallback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FallbackResponse>, ServerError> {
    let question = AskRequest::parse(&body)?;
    info!("Fallback request: {} chars", question.len());
    log_scores(&state, &question);

    let answer = state.engine.answer(&question, &state.fallback_options);
    debug!(
        "Fallback answer: vendor_directed={}, sources={:?}",
        answer.vendor_directed, answer.sources
    );

    Ok(Json(FallbackResponse {
        answer: answer.text,
        metadata: FallbackMetadata {
            source: FALLBACK_SOURCE,
            relevant_sources: answer.sources,
            timestamp: timestamp(),
        },
    }))
}

/// Middleware: answer OPTIONS with 204
///
/// Sits outside the CORS layer, which replies to every OPTIONS request
/// with an empty 200 carrying the CORS headers.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Handler: any other method on the answer endpoints
pub async fn handle_method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

fn log_scores(state: &AppState, question: &str) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        for scored in state.engine.scored(question).iter().take(10) {
            debug!("  {} => {}", scored.record.name, scored.relevance_score);
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
