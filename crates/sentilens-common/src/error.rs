use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentilensError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream predictor rejected the request; the message is what the
    /// dashboard surfaces verbatim.
    #[error("{0}")]
    Predictor(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SentilensError>;
