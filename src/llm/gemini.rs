use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::CONFIG;
use crate::llm::{ImageGenerationError, ImageGenerator};
use crate::media::detect_mime_type;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_upstream_timing;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        #[allow(dead_code)]
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()))
        {
            return message.to_string();
        }
        return truncate_for_log(&value.to_string(), 2000);
    }

    truncate_for_log(trimmed, 2000)
}

/// Extracts the bytes of the first inline image part, scanning candidates in
/// order. Text parts and non-image payloads are skipped.
fn extract_first_image(response: GeminiResponse) -> Option<Vec<u8>> {
    for candidate in response.candidates.unwrap_or_default() {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts.unwrap_or_default() {
            if let GeminiPart::InlineData { inline_data } = part {
                if inline_data.mime_type.starts_with("image/") {
                    if let Ok(bytes) = general_purpose::STANDARD.decode(inline_data.data) {
                        return Some(bytes);
                    }
                }
            }
        }
    }
    None
}

/// Client for the Gemini `generateContent` image endpoint.
pub struct GeminiClient {
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
    aspect_ratio: String,
    image_size: String,
}

impl GeminiClient {
    pub fn from_config() -> Self {
        Self {
            api_base: CONFIG.gemini_api_base.clone(),
            api_key: CONFIG.gemini_api_key.clone(),
            model: CONFIG.gemini_image_model.clone(),
            timeout: Duration::from_secs(CONFIG.gemini_timeout_secs),
            aspect_ratio: CONFIG.image_aspect_ratio.clone(),
            image_size: CONFIG.image_size.clone(),
        }
    }

    fn redact_api_key(&self, text: &str) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return text.to_string();
        }
        text.replace(key, "[redacted]")
    }

    fn build_payload(&self, prompt: &str, image: &[u8]) -> Value {
        let mime_type = detect_mime_type(image).unwrap_or_else(|| "image/jpeg".to_string());
        let encoded = general_purpose::STANDARD.encode(image);
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": prompt },
                    { "inlineData": { "mimeType": mime_type, "data": encoded } }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": {
                    "aspectRatio": self.aspect_ratio,
                    "imageSize": self.image_size
                }
            }
        })
    }

    // Single attempt; failures are terminal for this request and the user
    // retries manually.
    async fn call_api(&self, payload: Value) -> Result<GeminiResponse> {
        let client = get_http_client();
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );

        let response = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                anyhow!(
                    "Gemini request failed: {}",
                    self.redact_api_key(&err.to_string())
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = summarize_error_body(&body);
            debug!(target: "llm.gemini", status = %status, body = %truncate_for_log(&body, 4000));
            return Err(anyhow!(
                "Gemini request failed with status {}: {}",
                status,
                self.redact_api_key(&detail)
            ));
        }

        Ok(response.json::<GeminiResponse>().await?)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        image: &[u8],
    ) -> Result<Vec<u8>, ImageGenerationError> {
        let payload = self.build_payload(prompt, image);

        let response = log_upstream_timing("gemini", &self.model, "generate_graduation_photo", || async {
            self.call_api(payload).await
        })
        .await
        .map_err(|err| ImageGenerationError(err.to_string()))?;

        extract_first_image(response).ok_or_else(|| {
            ImageGenerationError(format!("No image produced by Gemini (model: {})", self.model))
        })
    }
}
