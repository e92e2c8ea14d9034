//! Environment-backed configuration with `.env` support.

use std::net::SocketAddr;

use sentilens_common::{Result, SentilensError};

pub const DEFAULT_PREDICTOR_URL: &str = "http://localhost:5000";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the sentiment predictor service.
    pub predictor_url: String,
    /// Base URL of the Ollama-compatible model endpoint.
    pub ollama_url: String,
    /// Model name sent with every generation/chat request.
    pub model: String,
    pub bind: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind = env_or("SENTILENS_BIND", DEFAULT_BIND);
        let bind = bind
            .parse()
            .map_err(|_| SentilensError::Config(format!("invalid SENTILENS_BIND: {bind}")))?;

        Ok(Self {
            predictor_url: env_or("SENTILENS_PREDICTOR_URL", DEFAULT_PREDICTOR_URL),
            ollama_url: env_or("SENTILENS_OLLAMA_URL", DEFAULT_OLLAMA_URL),
            model: env_or("SENTILENS_MODEL", DEFAULT_MODEL),
            bind,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
