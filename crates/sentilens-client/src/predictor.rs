//! Sentiment predictor client.
//!
//! One endpoint: `POST {base}/predict` with `{"review": <text>}`, returning
//! the full [`AnalysisResult`] on success. Non-success responses carry a
//! `message` (or `error`) field that the dashboard surfaces verbatim.

use reqwest::StatusCode;
use sentilens_common::{AnalysisResult, Result, SentilensError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub struct PredictorClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    review: &'a str,
}

impl PredictorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Submit one review for analysis. Callers are expected to reject
    /// empty/whitespace input before this ever issues a request.
    #[instrument(skip(self, review))]
    pub async fn analyze(&self, review: &str) -> Result<AnalysisResult> {
        let url = format!("{}/predict", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .json(&PredictRequest { review })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SentilensError::Predictor(error_message(status, &body)));
        }

        let result = resp.json::<AnalysisResult>().await?;
        debug!(sentiment = %result.sentiment, "predictor returned analysis");
        Ok(result)
    }
}

/// Extract the surfaced error text from a non-success predictor response:
/// the server-provided `message` (or `error`) verbatim when present, else a
/// generic status-coded message.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.message.or(parsed.error) {
            return msg;
        }
    }
    format!("Request failed with status {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used_verbatim() {
        let msg = error_message(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"message": "service unavailable"}"#,
        );
        assert_eq!(msg, "service unavailable");
    }

    #[test]
    fn test_flask_error_field_is_accepted() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error": "Review text is empty"}"#);
        assert_eq!(msg, "Review text is empty");
    }

    #[test]
    fn test_fallback_is_status_coded() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "not json"),
            "Request failed with status 502"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "{}"),
            "Request failed with status 500"
        );
    }
}
