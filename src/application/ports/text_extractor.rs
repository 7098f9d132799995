use async_trait::async_trait;

/// Pulls the embedded text layer out of a PDF.
///
/// An unparseable document or one with no extractable runs yields an empty
/// string, not an error; empty output is the downstream signal to fall back
/// to page rasterization. Errors are reserved for infrastructure failures
/// (timeouts, panicked workers).
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, data: &[u8]) -> Result<String, ExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("extraction timed out")]
    TimedOut,
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}
