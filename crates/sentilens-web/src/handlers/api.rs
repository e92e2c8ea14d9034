//! JSON analysis API — same flow as the form handler, machine-readable.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentilens_common::SentilensError;
use serde::Deserialize;
use serde_json::json;

use crate::state::{CurrentAnalysis, SharedState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub review: String,
}

/// POST /api/analyze — `{review}` in, the full `AnalysisResult` out.
/// Empty input is rejected locally and never reaches the predictor.
pub async fn api_analyze(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    if payload.review.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Review text is empty" })),
        )
            .into_response();
    }

    match state.predictor.analyze(&payload.review).await {
        Ok(result) => {
            *state.analysis.write().await = Some(CurrentAnalysis {
                review: payload.review,
                result: result.clone(),
            });
            Json(result).into_response()
        }
        Err(SentilensError::Predictor(msg)) => {
            (StatusCode::BAD_GATEWAY, Json(json!({ "message": msg }))).into_response()
        }
        Err(err) => {
            tracing::warn!(%err, "predictor unreachable");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Failed to connect to the server." })),
            )
                .into_response()
        }
    }
}
