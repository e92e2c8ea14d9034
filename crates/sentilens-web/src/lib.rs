//! sentilens-web — axum server for the review analysis dashboard, the chat
//! relay endpoints, and the report download.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
