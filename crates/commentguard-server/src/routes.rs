//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use commentguard_classifiers::{AnnotatedComment, ClassificationResult, SummaryReport};
use commentguard_core::VideoInfo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::state::AppState;
use crate::video_id::extract_video_id;
use crate::youtube::SourceError;

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/comments", post(analyze_comments))
        .route("/api/classify", post(classify_text))
        .route("/metrics", get(metrics));

    let router = match state.config.static_dir.clone() {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(fallback),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "api_key_configured": state.source.is_configured(),
        "model": &*state.model,
    }))
}

async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}

/// Request body for comment analysis
#[derive(Debug, Deserialize)]
pub struct CommentsRequest {
    #[serde(default)]
    pub url: String,

    /// Optional cap below the configured maximum
    #[serde(default)]
    pub max_comments: Option<usize>,
}

/// Video metadata, classified comments and their summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub video: VideoInfo,
    pub comments: Vec<AnnotatedComment>,
    pub summary: SummaryReport,
    pub total_fetched: usize,
}

async fn analyze_comments(
    State(state): State<AppState>,
    Json(req): Json<CommentsRequest>,
) -> Result<Json<CommentsResponse>, AppError> {
    let request_id = uuid::Uuid::new_v4();
    metrics::counter!("commentguard_requests_total", "endpoint" => "comments").increment(1);

    let url = req.url.trim();
    if url.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please provide a YouTube URL".to_string(),
        ));
    }

    if !state.source.is_configured() {
        return Err(AppError::NotConfigured);
    }

    let video_id = extract_video_id(url).ok_or_else(|| {
        AppError::InvalidRequest(
            "Invalid YouTube URL. Please provide a valid YouTube video link.".to_string(),
        )
    })?;

    info!(%request_id, video_id = %video_id, "Analyzing comments");

    let video = state
        .source
        .fetch_video_info(&video_id)
        .await?
        .ok_or(AppError::Source(SourceError::VideoNotFound))?;

    let limit = req
        .max_comments
        .unwrap_or(state.config.max_comments)
        .clamp(1, state.config.max_comments);
    let comments = state.source.fetch_comments(&video_id, limit).await?;
    debug!(%request_id, fetched = comments.len(), "Fetched comments");

    let aggregator = state.aggregator.clone();
    let report = tokio::task::spawn_blocking(move || aggregator.classify_batch_auto(&comments))
        .await
        .map_err(|e| AppError::InternalError(format!("classification task failed: {e}")))?;

    info!(
        %request_id,
        total = report.summary.total_comments,
        flagged = report.summary.flagged_count,
        "Comment analysis complete"
    );

    Ok(Json(CommentsResponse {
        video,
        total_fetched: report.comments.len(),
        comments: report.comments,
        summary: report.summary,
    }))
}

/// Request body for single-text classification
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: String,
}

async fn classify_text(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassificationResult>, AppError> {
    metrics::counter!("commentguard_requests_total", "endpoint" => "classify").increment(1);

    if req.text.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Please provide text to classify".to_string(),
        ));
    }

    Ok(Json(state.aggregator.classifier().classify_comment(&req.text)))
}

async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotConfigured,
    Source(SourceError),
    InternalError(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "YouTube API key is not configured. Please set YOUTUBE_API_KEY.".to_string(),
            ),
            AppError::Source(SourceError::VideoNotFound) => (
                StatusCode::NOT_FOUND,
                "Video not found. Please check the URL and try again.".to_string(),
            ),
            AppError::Source(SourceError::CommentsDisabled) => (
                StatusCode::FORBIDDEN,
                "Comments are disabled for this video.".to_string(),
            ),
            AppError::Source(SourceError::QuotaExceeded) => (
                StatusCode::TOO_MANY_REQUESTS,
                "YouTube API quota exceeded. Please try again later.".to_string(),
            ),
            AppError::Source(SourceError::MissingApiKey) => {
                return AppError::NotConfigured.into_response();
            }
            AppError::Source(err) => {
                error!("Comment source failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch comments: {err}"),
                )
            }
            AppError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        if status.is_client_error() {
            warn!(status = status.as_u16(), %message, "Request rejected");
        }
        metrics::counter!("commentguard_errors_total", "status" => status.as_u16().to_string())
            .increment(1);

        (status, Json(json!({ "error": message }))).into_response()
    }
}
