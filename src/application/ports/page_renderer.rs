use async_trait::async_trait;

use crate::domain::EncodedImage;

/// Renders the first pages of a PDF to model-ready images.
///
/// Returns an empty vec (not an error) when rendering is unsupported for
/// the input, e.g. the raster backend is unavailable or the document
/// cannot be opened. The caller treats empty output as "no usable image".
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render_pages(
        &self,
        data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<EncodedImage>, RendererError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("rendering timed out")]
    TimedOut,
    #[error("render task failed: {0}")]
    TaskFailed(String),
}
