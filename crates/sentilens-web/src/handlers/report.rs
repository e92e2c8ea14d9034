//! Report download handler — synthesizes the PDF for the current analysis.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use sentilens_report::{render_report, REPORT_FILENAME};

use crate::state::SharedState;

/// GET /report — stream the synthesized PDF, or bounce back to the dashboard
/// when nothing has been analyzed yet.
pub async fn download_report(State(state): State<SharedState>) -> Response {
    let Some(current) = state.analysis.read().await.clone() else {
        return Redirect::to("/").into_response();
    };

    match render_report(&current.review, &current.result) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{REPORT_FILENAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, "report synthesis failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Report generation failed").into_response()
        }
    }
}
