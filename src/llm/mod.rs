pub mod gemini;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
#[error("Image generation failed: {0}")]
pub struct ImageGenerationError(pub String);

/// Upstream image model behind the generation endpoint. Implemented by the
/// Gemini client; tests substitute a mock so admission behavior can be
/// verified without network access.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Submits one multimodal request (instruction text plus inline image)
    /// and returns the bytes of the first image the model produced.
    async fn generate(
        &self,
        prompt: &str,
        image: &[u8],
    ) -> Result<Vec<u8>, ImageGenerationError>;
}
