//! sentilens-common — Shared types, errors, color tables, and display
//! formatting used across all Sentilens crates.

pub mod colors;
pub mod error;
pub mod format;
pub mod model;

// Re-export commonly used types
pub use colors::ColorMap;
pub use error::{Result, SentilensError};
pub use model::{AnalysisResult, ChatMessage, ChatRole, NamedEntity, Sentiment};
