use std::env;

use once_cell::sync::Lazy;

/// Server configuration, loaded once from the environment.
///
/// Secrets default to empty strings rather than failing at startup; the
/// handlers that need them report a configuration error at the point of use,
/// so a missing Gemini key still leaves the password gate serviceable.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub bind_addr: String,
    pub access_password: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_image_model: String,
    pub gemini_timeout_secs: u64,
    pub image_aspect_ratio: String,
    pub image_size: String,
    pub max_image_width: u32,
    pub jpeg_quality: u8,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_ms: u64,
    pub rate_limit_sweep_interval_ms: u64,
    pub upload_api_url: String,
    pub upload_api_key: String,
    pub upload_log_timeout_ms: u64,
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_u8(name: &str, default: u8) -> u8 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn load() -> Self {
        Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            bind_addr: env_string("BIND_ADDR", "0.0.0.0:3000"),
            access_password: env_string("ACCESS_PASSWORD", ""),
            gemini_api_key: env_string("GEMINI_API_KEY", ""),
            gemini_api_base: env_string(
                "GEMINI_API_BASE",
                "https://generativelanguage.googleapis.com",
            ),
            gemini_image_model: env_string("GEMINI_IMAGE_MODEL", "gemini-3-pro-image-preview"),
            gemini_timeout_secs: env_u64("GEMINI_TIMEOUT_SECS", 90),
            image_aspect_ratio: env_string("IMAGE_ASPECT_RATIO", "3:4"),
            image_size: env_string("IMAGE_SIZE", "1K"),
            max_image_width: env_u32("MAX_IMAGE_WIDTH", 1024),
            jpeg_quality: env_u8("JPEG_QUALITY", 80),
            rate_limit_max_requests: env_u32("RATE_LIMIT_MAX_REQUESTS", 5),
            rate_limit_window_ms: env_u64("RATE_LIMIT_WINDOW_MS", 60_000),
            rate_limit_sweep_interval_ms: env_u64("RATE_LIMIT_SWEEP_INTERVAL_MS", 60_000),
            upload_api_url: env_string("UPLOAD_API_URL", ""),
            upload_api_key: env_string("UPLOAD_API_KEY", ""),
            upload_log_timeout_ms: env_u64("UPLOAD_LOG_TIMEOUT_MS", 5_000),
        }
    }
}
