use std::time::Duration;

use dotenvy::dotenv;
use tracing::{info, warn};

mod audit;
mod config;
mod handlers;
mod llm;
mod media;
mod options;
mod prompt;
mod ratelimit;
mod state;
mod utils;

use config::CONFIG;
use state::AppState;
use utils::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guards = init_logging();

    if CONFIG.access_password.trim().is_empty() {
        warn!("ACCESS_PASSWORD is not set; password verification will fail");
    }
    if CONFIG.gemini_api_key.trim().is_empty() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    if CONFIG.upload_api_url.trim().is_empty() || CONFIG.upload_api_key.trim().is_empty() {
        info!("upload log collector not configured; uploads will not be recorded");
    }

    let state = AppState::from_config();

    let limiter = state.limiter.clone();
    let sweep_interval = Duration::from_millis(CONFIG.rate_limit_sweep_interval_ms);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        // The first tick completes immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.sweep();
        }
    });

    let app = handlers::router(state);
    let listener = tokio::net::TcpListener::bind(&CONFIG.bind_addr).await?;
    info!(addr = %CONFIG.bind_addr, "Graduation photo server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {err}");
        return;
    }
    info!("shutdown signal received");
}
