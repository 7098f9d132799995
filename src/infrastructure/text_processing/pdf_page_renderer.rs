use std::time::Duration;

use async_trait::async_trait;
use pdfium_render::prelude::*;

use crate::application::ports::{PageRenderer, RendererError};
use crate::domain::EncodedImage;

use super::image_normalizer::encode_normalized;

const RENDER_DPI: f32 = 144.0;
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Rasterizes the leading pages of a scanned PDF via pdfium.
///
/// pdfium is a system library; when it cannot be bound, or the document
/// cannot be opened, this renderer reports an empty page list rather than
/// an error so the caller can surface actionable guidance to the user.
/// Rendering is CPU-bound and runs on the blocking pool.
#[derive(Default)]
pub struct PdfiumPageRenderer;

impl PdfiumPageRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_blocking(data: &[u8], max_pages: usize) -> Vec<EncodedImage> {
        let bindings = match Pdfium::bind_to_system_library() {
            Ok(bindings) => bindings,
            Err(e) => {
                tracing::warn!(error = %e, "pdfium unavailable, no raster fallback");
                return Vec::new();
            }
        };
        let pdfium = Pdfium::new(bindings);

        let doc = match pdfium.load_pdf_from_byte_slice(data, None) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "pdfium could not open document");
                return Vec::new();
            }
        };

        let total = (doc.pages().len() as usize).max(1);
        let pages_to_render = total.min(max_pages);

        let mut rendered = Vec::with_capacity(pages_to_render);
        for index in 0..pages_to_render {
            let page = match doc.pages().get(index as u16) {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(page = index, error = %e, "page access failed, skipping");
                    continue;
                }
            };

            let width = (page.width().value * RENDER_DPI / 72.0) as i32;
            let height = (page.height().value * RENDER_DPI / 72.0) as i32;

            let bitmap = match page.render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            ) {
                Ok(bitmap) => bitmap,
                Err(e) => {
                    tracing::warn!(page = index, error = %e, "render failed, skipping");
                    continue;
                }
            };

            match encode_normalized(bitmap.as_image()) {
                Ok(image) => rendered.push(image),
                Err(e) => {
                    tracing::warn!(page = index, error = %e, "encode failed, skipping");
                }
            }
        }

        rendered
    }
}

#[async_trait]
impl PageRenderer for PdfiumPageRenderer {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len(), max_pages))]
    async fn render_pages(
        &self,
        data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<EncodedImage>, RendererError> {
        let owned = data.to_vec();

        let pages = tokio::time::timeout(
            RENDER_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::render_blocking(&owned, max_pages)),
        )
        .await
        .map_err(|_| RendererError::TimedOut)?
        .map_err(|e| RendererError::TaskFailed(format!("task join error: {e}")))?;

        tracing::info!(pages = pages.len(), "PDF rasterization complete");
        Ok(pages)
    }
}
