use std::sync::Arc;

use crate::application::ports::{
    ContentPart, ExtractorError, ModelClient, ModelClientError, PageRenderer, RendererError,
    TextExtractor,
};
use crate::domain::{EncodedImage, SourceKind};

use super::chunker::{chunk_text, truncate_chars, DEFAULT_CHUNK_SIZE};
use super::model_reply::{parse_reply, ModelReply, ReplyParseError, MAX_TITLE_CHARS};
use super::prompts;

/// Tunables for the summarization decision tree.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Above this many characters (and with no images) the chunk-and-merge
    /// path is taken; below it, text is sent whole but truncated to this
    /// length for the single call.
    pub long_document_threshold: usize,
    pub chunk_size: usize,
    /// Maximum images attached to a single model call.
    pub max_images: usize,
    /// Pages auto-rasterized when a PDF has no text layer.
    pub max_fallback_pages: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            long_document_threshold: 12_000,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_images: 4,
            max_fallback_pages: 2,
        }
    }
}

/// Uploaded PDF: original filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Validated output of one summarization run, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDraft {
    pub source: SourceKind,
    pub title: String,
    pub body: String,
    pub keywords: Vec<String>,
    pub input_text: Option<String>,
    pub pdf_name: Option<String>,
    pub image_count: Option<i32>,
}

/// Decides the summarization strategy, drives the model, and validates the
/// reply.
///
/// Strategy, in order: long text with no images goes through chunk-and-merge
/// (sequential chunk calls so `CHUNK_n` labels stay in document order, then
/// one merge call); everything else is a single call combining the prompt,
/// the possibly truncated text, and up to `max_images` attached images.
/// User-supplied images take priority; a scanned PDF falls back to
/// auto-rasterized pages before failing.
pub struct SummarizationService<M, X, R>
where
    M: ModelClient,
    X: TextExtractor,
    R: PageRenderer,
{
    model: Arc<M>,
    extractor: Arc<X>,
    renderer: Arc<R>,
    config: SummarizerConfig,
}

impl<M, X, R> SummarizationService<M, X, R>
where
    M: ModelClient,
    X: TextExtractor,
    R: PageRenderer,
{
    pub fn new(
        model: Arc<M>,
        extractor: Arc<X>,
        renderer: Arc<R>,
        config: SummarizerConfig,
    ) -> Self {
        Self {
            model,
            extractor,
            renderer,
            config,
        }
    }

    #[tracing::instrument(
        skip(self, pdf, images),
        fields(
            has_pdf = pdf.is_some(),
            user_images = images.len(),
        )
    )]
    pub async fn summarize(
        &self,
        pdf: Option<PdfUpload>,
        images: Vec<EncodedImage>,
    ) -> Result<SummaryDraft, SummarizeError> {
        if pdf.is_none() && images.is_empty() {
            return Err(SummarizeError::NoInput);
        }

        let mut text = String::new();
        if let Some(upload) = &pdf {
            text = self.extractor.extract_text(&upload.bytes).await?;
            tracing::debug!(chars = text.chars().count(), "PDF text extraction done");
        }

        // Scanned-PDF fallback: rasterize pages before giving up. Only when
        // the user supplied no images of their own.
        let mut fallback_pages: Vec<EncodedImage> = Vec::new();
        if let Some(upload) = &pdf {
            if text.is_empty() && images.is_empty() {
                fallback_pages = self
                    .renderer
                    .render_pages(&upload.bytes, self.config.max_fallback_pages)
                    .await?;
                tracing::info!(pages = fallback_pages.len(), "Rasterized scanned PDF");
                if fallback_pages.is_empty() {
                    return Err(SummarizeError::UnreadableScanned);
                }
            }
        }

        let attached = if images.is_empty() {
            fallback_pages
        } else {
            images
        };

        let text_chars = text.chars().count();
        let reply = if text_chars > self.config.long_document_threshold && attached.is_empty() {
            self.chunk_and_merge(&text, text_chars).await?
        } else {
            self.summarize_direct(&text, text_chars, &attached).await?
        };

        let images_used = attached.len().min(self.config.max_images);
        let pdf_name = pdf.as_ref().map(|p| p.filename.clone());
        let source = SourceKind::classify(pdf.is_some(), images_used)
            .ok_or(SummarizeError::NoInput)?;

        let title = finalize_title(reply.title, pdf_name.as_deref());

        Ok(SummaryDraft {
            source,
            title,
            body: reply.summary,
            keywords: reply.keywords,
            input_text: (!text.is_empty()).then_some(text),
            pdf_name,
            image_count: (images_used > 0).then_some(images_used as i32),
        })
    }

    /// Single model call: prompt + truncated text + up to `max_images`
    /// attachments.
    async fn summarize_direct(
        &self,
        text: &str,
        text_chars: usize,
        attached: &[EncodedImage],
    ) -> Result<ModelReply, SummarizeError> {
        let band = prompts::sentence_band(text_chars);
        let mut parts = vec![ContentPart::Text(prompts::direct_prompt(band))];

        if !text.is_empty() {
            let truncated = truncate_chars(text, self.config.long_document_threshold);
            parts.push(ContentPart::Text(truncated.to_string()));
        }

        for image in attached.iter().take(self.config.max_images) {
            parts.push(ContentPart::InlineImage(image.clone()));
        }

        let raw = self.model.generate(&parts).await?;
        Ok(parse_reply(&raw)?)
    }

    /// Long-document path: summarize each chunk sequentially, then merge.
    ///
    /// The loop is deliberately sequential; CHUNK_n labels in the merge
    /// prompt must stay in document order.
    async fn chunk_and_merge(
        &self,
        text: &str,
        text_chars: usize,
    ) -> Result<ModelReply, SummarizeError> {
        let chunks = chunk_text(text, self.config.chunk_size);
        let total = chunks.len();
        tracing::info!(chunks = total, "Long document, chunk-and-merge path");

        let mut partials = Vec::with_capacity(total);
        for (index, chunk) in chunks.into_iter().enumerate() {
            let parts = [
                ContentPart::Text(prompts::chunk_prompt(index + 1, total)),
                ContentPart::Text(chunk),
            ];
            let raw = self.model.generate(&parts).await?;
            let reply = parse_reply(&raw)?;
            partials.push(reply.summary);
        }

        let band = prompts::sentence_band(text_chars);
        let merge = [ContentPart::Text(prompts::merge_prompt(band, &partials))];
        let raw = self.model.generate(&merge).await?;
        Ok(parse_reply(&raw)?)
    }
}

/// Truncates the model's title to the persistence bound, substituting the
/// uploaded filename stem (or a fixed default) when absent.
fn finalize_title(title: Option<String>, pdf_name: Option<&str>) -> String {
    let title = title.unwrap_or_else(|| {
        pdf_name
            .map(|name| {
                name.rsplit_once('.')
                    .map(|(stem, _)| stem)
                    .unwrap_or(name)
                    .to_string()
            })
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "Untitled document".to_string())
    });

    truncate_chars(&title, MAX_TITLE_CHARS).to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("no file submitted: attach a PDF and/or images")]
    NoInput,
    #[error(
        "the PDF contains no readable text and its pages could not be \
rendered; please upload page images manually"
    )]
    UnreadableScanned,
    #[error(transparent)]
    Model(#[from] ModelClientError),
    #[error(transparent)]
    Malformed(#[from] ReplyParseError),
    #[error("text extraction: {0}")]
    Extraction(#[from] ExtractorError),
    #[error("page rendering: {0}")]
    Rendering(#[from] RendererError),
}
