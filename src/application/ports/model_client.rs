use async_trait::async_trait;

use crate::domain::EncodedImage;

/// One part of a multimodal model request, in transmission order.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    InlineImage(EncodedImage),
}

/// Generative model endpoint accepting text and inline image parts and
/// returning free-form text expected to contain JSON.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    #[error("model api credential is not configured")]
    MissingCredential,
    #[error("model endpoint overloaded after {retries} retries")]
    Overloaded { retries: u32 },
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
