//! Shared application state for the web server.

use std::sync::Arc;

use sentilens_client::{OllamaClient, PredictorClient};
use sentilens_common::{AnalysisResult, ChatMessage};
use tokio::sync::RwLock;

use crate::config::AppConfig;

/// The most recent analysis. Replaced wholesale on each successful run;
/// never merged.
#[derive(Debug, Clone)]
pub struct CurrentAnalysis {
    pub review: String,
    pub result: AnalysisResult,
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: AppConfig,
    pub predictor: PredictorClient,
    pub ollama: OllamaClient,
    /// Current-analysis slot; latest completion wins.
    pub analysis: RwLock<Option<CurrentAnalysis>>,
    /// Append-only chat transcript, process lifetime.
    pub transcript: RwLock<Vec<ChatMessage>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let predictor = PredictorClient::new(config.predictor_url.clone());
        let ollama = OllamaClient::new(config.ollama_url.clone(), config.model.clone());
        Self {
            config,
            predictor,
            ollama,
            analysis: RwLock::new(None),
            transcript: RwLock::new(Vec::new()),
        }
    }
}

pub type SharedState = Arc<AppState>;
