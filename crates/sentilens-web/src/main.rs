//! Sentilens Web Server
//!
//! Run with: cargo run -p sentilens-web

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = sentilens_web::config::AppConfig::from_env()?;
    info!(
        predictor = %config.predictor_url,
        ollama = %config.ollama_url,
        "Starting Sentilens web server"
    );

    let addr = config.bind;
    let state = sentilens_web::state::AppState::new(config);
    let app = sentilens_web::router::build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
