//! Chat handlers: the transcript-backed chat flow on the dashboard and the
//! two JSON relay endpoints in front of the model server.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use sentilens_client::ChatError;
use sentilens_common::ChatMessage;
use serde::Deserialize;
use serde_json::json;

use crate::state::SharedState;

/// Fixed assistant turn appended when anything about the reply fails.
pub const CHAT_ERROR_REPLY: &str = "⚠️ Error in response";

#[derive(Deserialize)]
pub struct ChatForm {
    pub message: String,
}

/// POST /chat — append the user turn immediately, fetch one assistant turn
/// (streamed NDJSON, concatenated before it is appended), then return to the
/// dashboard. The transcript gains exactly one assistant turn per submission,
/// the fallback string on any failure.
pub async fn chat_submit(
    State(state): State<SharedState>,
    Form(form): Form<ChatForm>,
) -> Redirect {
    let message = form.message.trim().to_string();
    if message.is_empty() {
        return Redirect::to("/");
    }

    state.transcript.write().await.push(ChatMessage::user(message));

    let messages = state.transcript.read().await.clone();
    let reply = match state.ollama.chat_stream(&messages).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(%err, "chat request failed");
            CHAT_ERROR_REPLY.to_string()
        }
    };
    state.transcript.write().await.push(ChatMessage::assistant(reply));

    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct RelayRequest {
    pub message: String,
}

/// POST /api/chat — relay through `/api/generate`, non-streaming.
pub async fn relay_generate(
    State(state): State<SharedState>,
    Json(payload): Json<RelayRequest>,
) -> Response {
    match state.ollama.generate(&payload.message).await {
        Ok(response) => Json(json!({ "response": response })).into_response(),
        Err(err) => {
            tracing::error!(%err, "generate relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Chatbot failed to respond" })),
            )
                .into_response()
        }
    }
}

/// POST /api/ollama-chat — relay through `/api/chat`, non-streaming.
/// Upstream non-success is forwarded verbatim (status and body); transport
/// or parse failures become a plain 500.
pub async fn relay_chat(
    State(state): State<SharedState>,
    Json(payload): Json<RelayRequest>,
) -> Response {
    match state.ollama.chat(&payload.message).await {
        Ok(reply) => Json(json!({ "reply": reply })).into_response(),
        Err(ChatError::Upstream { status, body }) => (status, body).into_response(),
        Err(err) => {
            tracing::error!(%err, "chat relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::state::AppState;

    fn state_with_unreachable_backends() -> SharedState {
        Arc::new(AppState::new(AppConfig {
            predictor_url: "http://127.0.0.1:1".to_string(),
            ollama_url: "http://127.0.0.1:1".to_string(),
            model: "mistral".to_string(),
            bind: "127.0.0.1:0".parse().unwrap(),
        }))
    }

    #[tokio::test]
    async fn test_chat_failure_appends_single_fallback_turn() {
        let state = state_with_unreachable_backends();

        chat_submit(
            State(state.clone()),
            Form(ChatForm {
                message: "hi".to_string(),
            }),
        )
        .await;

        let transcript = state.transcript.read().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ChatMessage::user("hi"));
        assert_eq!(transcript[1], ChatMessage::assistant(CHAT_ERROR_REPLY));
    }

    #[tokio::test]
    async fn test_empty_chat_message_leaves_transcript_untouched() {
        let state = state_with_unreachable_backends();

        chat_submit(
            State(state.clone()),
            Form(ChatForm {
                message: "   ".to_string(),
            }),
        )
        .await;

        assert!(state.transcript.read().await.is_empty());
    }
}
