use std::sync::Arc;
use std::time::Duration;

use crate::config::CONFIG;
use crate::llm::gemini::GeminiClient;
use crate::llm::ImageGenerator;
use crate::ratelimit::{RateLimitConfig, RateLimiter};

/// Shared per-process state handed to the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub generator: Arc<dyn ImageGenerator>,
    pub access_password: String,
    pub gemini_configured: bool,
}

impl AppState {
    pub fn from_config() -> Self {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: CONFIG.rate_limit_max_requests,
            window: Duration::from_millis(CONFIG.rate_limit_window_ms),
        });

        AppState {
            limiter: Arc::new(limiter),
            generator: Arc::new(GeminiClient::from_config()),
            access_password: CONFIG.access_password.clone(),
            gemini_configured: !CONFIG.gemini_api_key.trim().is_empty(),
        }
    }
}
