//! sentilens-client — HTTP clients for the two external services: the
//! sentiment predictor and the Ollama-compatible language model endpoint.

pub mod ollama;
pub mod predictor;

pub use ollama::{ChatError, OllamaClient};
pub use predictor::PredictorClient;
