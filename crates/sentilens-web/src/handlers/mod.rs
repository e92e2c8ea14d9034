pub mod api;
pub mod chat;
pub mod dashboard;
pub mod report;
