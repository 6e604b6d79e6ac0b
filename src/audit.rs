use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::CONFIG;
use crate::options::GraduationOptions;
use crate::utils::http::get_http_client;

/// SHA-256 hex digest of the encoded image, used to identify uploads in the
/// collector's log.
pub fn fingerprint(encoded_image: &str) -> String {
    format!("{:x}", Sha256::digest(encoded_image.as_bytes()))
}

/// Decoded size implied by a base64 payload, rounded up.
pub fn approx_decoded_size(encoded_len: usize) -> usize {
    (encoded_len * 3).div_ceil(4)
}

/// Fires a best-effort upload record at the audit collector on a detached
/// task. Never awaited by the generation path; failures and timeouts are
/// logged and discarded. Skipped entirely when the collector is not
/// configured.
pub fn spawn_upload_log(encoded_image: String, client_key: String, options: &GraduationOptions) {
    if CONFIG.upload_api_url.trim().is_empty() || CONFIG.upload_api_key.trim().is_empty() {
        warn!("UPLOAD_API_URL or UPLOAD_API_KEY not set, skipping upload log");
        return;
    }

    let payload = json!({
        "imageBase64": encoded_image,
        "ip": client_key,
        "fileSize": approx_decoded_size(encoded_image.len()),
        "sha256Hash": fingerprint(&encoded_image),
        "options": {
            "schoolLevel": options.school_level,
            "gownColor": options.gown_color,
            "background": options.background,
            "confetti": options.confetti,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    tokio::spawn(async move {
        let client = get_http_client();
        let result = client
            .post(&CONFIG.upload_api_url)
            .bearer_auth(&CONFIG.upload_api_key)
            .timeout(Duration::from_millis(CONFIG.upload_log_timeout_ms))
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "upload log rejected by collector");
            }
            Err(err) => {
                warn!("upload log failed to send: {err}");
            }
            Ok(_) => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_sha256_hex() {
        // sha256("abc")
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(fingerprint("abc").len(), 64);
    }

    #[test]
    fn approximates_decoded_byte_size() {
        // ceil(len * 3 / 4)
        assert_eq!(approx_decoded_size(0), 0);
        assert_eq!(approx_decoded_size(4), 3);
        assert_eq!(approx_decoded_size(6), 5);
        assert_eq!(approx_decoded_size(100), 75);
    }
}
