//! Ollama-compatible language model client.
//!
//! Endpoints used:
//!   /api/generate — single-prompt completion, non-streaming
//!   /api/chat     — multi-turn chat, streaming (NDJSON) or not

use futures_util::StreamExt;
use sentilens_common::ChatMessage;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ChatError {
    /// Upstream answered with a non-success status; the relay forwards
    /// status and body verbatim.
    #[error("upstream returned {status}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed upstream body: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// One-shot completion via `/api/generate`, non-streaming.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        #[derive(Deserialize)]
        struct GenerateResponse {
            response: String,
        }

        let resp = self
            .client
            .post(self.endpoint("/api/generate"))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Upstream { status, body });
        }

        let body = resp.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }

    /// Single user turn via `/api/chat`, non-streaming.
    #[instrument(skip(self, message))]
    pub async fn chat(&self, message: &str) -> Result<String, ChatError> {
        #[derive(Deserialize)]
        struct ChatResponse {
            message: ChatTurn,
        }
        #[derive(Deserialize)]
        struct ChatTurn {
            content: String,
        }

        let resp = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": message}],
                "stream": false,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Upstream { status, body });
        }

        let body = resp.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        Ok(parsed.message.content)
    }

    /// Full-transcript chat via `/api/chat` with `stream: true`. The reply
    /// arrives as newline-delimited JSON fragments; each fragment's
    /// `message.content` piece is concatenated in arrival order and the
    /// complete reply returned once the stream ends.
    #[instrument(skip(self, messages))]
    pub async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let resp = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "stream": true,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Upstream { status, body });
        }

        let mut stream = resp.bytes_stream();
        let mut acc = LineAccumulator::new();
        while let Some(chunk) = stream.next().await {
            acc.push_chunk(&chunk?)?;
        }
        let reply = acc.finish()?;
        debug!(len = reply.len(), "assembled streamed chat reply");
        Ok(reply)
    }
}

/// Reassembles NDJSON lines from transport chunks that may split a line
/// anywhere, and concatenates each line's `message.content`.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buffer: String,
    reply: String,
}

#[derive(Deserialize)]
struct StreamLine {
    #[serde(default)]
    message: Option<StreamTurn>,
}

#[derive(Deserialize)]
struct StreamTurn {
    #[serde(default)]
    content: String,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<(), serde_json::Error> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.consume_line(line.trim())?;
        }
        Ok(())
    }

    fn consume_line(&mut self, line: &str) -> Result<(), serde_json::Error> {
        if line.is_empty() {
            return Ok(());
        }
        let parsed: StreamLine = serde_json::from_str(line)?;
        if let Some(turn) = parsed.message {
            self.reply.push_str(&turn.content);
        }
        Ok(())
    }

    /// Flush any final unterminated line and return the assembled reply.
    pub fn finish(mut self) -> Result<String, serde_json::Error> {
        let rest = std::mem::take(&mut self.buffer);
        self.consume_line(rest.trim())?;
        Ok(self.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenates_fragments_in_order() {
        let mut acc = LineAccumulator::new();
        acc.push_chunk(b"{\"message\":{\"content\":\"Hel\"}}\n").unwrap();
        acc.push_chunk(b"{\"message\":{\"content\":\"lo\"}}\n{\"done\":true}\n")
            .unwrap();
        assert_eq!(acc.finish().unwrap(), "Hello");
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut acc = LineAccumulator::new();
        acc.push_chunk(b"{\"message\":{\"cont").unwrap();
        acc.push_chunk(b"ent\":\"hi\"}}\n").unwrap();
        assert_eq!(acc.finish().unwrap(), "hi");
    }

    #[test]
    fn test_final_line_without_newline_is_flushed() {
        let mut acc = LineAccumulator::new();
        acc.push_chunk(b"{\"message\":{\"content\":\"tail\"}}").unwrap();
        assert_eq!(acc.finish().unwrap(), "tail");
    }

    #[test]
    fn test_missing_message_piece_is_skipped() {
        let mut acc = LineAccumulator::new();
        acc.push_chunk(b"{\"done\":true}\n").unwrap();
        assert_eq!(acc.finish().unwrap(), "");
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let mut acc = LineAccumulator::new();
        assert!(acc.push_chunk(b"not json\n").is_err());
    }
}
