use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{ExtractorError, TextExtractor};

use super::text_sanitizer::collapse_whitespace;

/// Hard cap on pages considered for text extraction.
pub const PAGE_CAP: usize = 20;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Text-layer extraction via lopdf.
///
/// Parsing happens on the blocking pool; a document that cannot be parsed
/// or has no extractable runs yields an empty string, which downstream
/// code treats as the scanned-PDF signal.
#[derive(Default)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(data: &[u8]) -> String {
        let doc = match Document::load_mem(data) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!(error = %e, "PDF parse failed, treating as no text layer");
                return String::new();
            }
        };

        let mut page_texts: Vec<String> = Vec::new();
        for page_number in doc.get_pages().keys().take(PAGE_CAP) {
            let raw = doc.extract_text(&[*page_number]).unwrap_or_default();
            let cleaned = collapse_whitespace(&raw);
            if !cleaned.is_empty() {
                page_texts.push(cleaned);
            }
        }

        page_texts.join(" ")
    }
}

#[async_trait]
impl TextExtractor for LopdfTextExtractor {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8]) -> Result<String, ExtractorError> {
        let owned = data.to_vec();

        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocking(&owned)),
        )
        .await
        .map_err(|_| ExtractorError::TimedOut)?
        .map_err(|e| ExtractorError::TaskFailed(format!("task join error: {e}")))?;

        tracing::info!(chars = text.chars().count(), "PDF text extraction complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_pdf_bytes_yield_empty_text_not_an_error() {
        let extractor = LopdfTextExtractor::new();
        let text = extractor.extract_text(b"definitely not a pdf").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn extraction_is_idempotent_on_identical_bytes() {
        let extractor = LopdfTextExtractor::new();
        let input = b"%PDF-1.4 truncated".to_vec();
        let first = extractor.extract_text(&input).await.unwrap();
        let second = extractor.extract_text(&input).await.unwrap();
        assert_eq!(first, second);
    }
}
