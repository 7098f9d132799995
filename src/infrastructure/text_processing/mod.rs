mod image_normalizer;
mod pdf_page_renderer;
mod pdf_text_extractor;
mod text_sanitizer;

pub use image_normalizer::{normalize_image, NormalizeError, JPEG_QUALITY, MAX_WIDTH};
pub use pdf_page_renderer::PdfiumPageRenderer;
pub use pdf_text_extractor::{LopdfTextExtractor, PAGE_CAP};
pub use text_sanitizer::collapse_whitespace;
