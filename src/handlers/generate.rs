use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::audit;
use crate::config::CONFIG;
use crate::handlers::error::ApiError;
use crate::media;
use crate::options::GraduationOptions;
use crate::prompt;
use crate::ratelimit;
use crate::state::AppState;

const MISSING_FIELDS: &str = "An image and options are required.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub image_base64: String,
    pub options: GraduationOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image_base64: String,
}

/// Generation proxy: admission check, payload validation, client-bound
/// downscale, best-effort upload log, then a single upstream model call.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let client_key = ratelimit::client_key(&headers);

    if !state.limiter.check(&client_key) {
        warn!(client = %client_key, "generation request rate limited");
        return Err(ApiError::RateLimited);
    }

    if !state.gemini_configured {
        error!("GEMINI_API_KEY is not configured");
        return Err(ApiError::Configuration);
    }

    let Ok(Json(request)) = payload else {
        return Err(ApiError::Validation(MISSING_FIELDS.to_string()));
    };
    if request.image_base64.trim().is_empty() {
        return Err(ApiError::Validation(MISSING_FIELDS.to_string()));
    }

    let encoded = media::strip_data_uri(&request.image_base64);
    let raw = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| ApiError::Validation("The uploaded image could not be decoded.".to_string()))?;
    let prepared = media::downscale_image(&raw, CONFIG.max_image_width, CONFIG.jpeg_quality)
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    // Fire-and-forget; generation proceeds regardless of collector health.
    audit::spawn_upload_log(encoded.to_string(), client_key.clone(), &request.options);

    let instruction = prompt::build_prompt(&request.options);
    let generated = state
        .generator
        .generate(&instruction, &prepared)
        .await
        .map_err(|err| {
            error!(client = %client_key, "image generation failed: {err}");
            ApiError::Upstream(err.to_string())
        })?;

    info!(client = %client_key, bytes = generated.len(), "generated graduation photo");
    Ok(Json(GenerateResponse {
        image_base64: format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&generated)
        ),
    }))
}
