mod chunker;
mod model_reply;
mod prompts;
mod summarization_service;

pub use chunker::{chunk_text, truncate_chars, DEFAULT_CHUNK_SIZE};
pub use model_reply::{parse_reply, ModelReply, ReplyParseError, DEFAULT_KEYWORDS, MAX_TITLE_CHARS};
pub use prompts::sentence_band;
pub use summarization_service::{
    PdfUpload, SummarizationService, SummarizeError, SummarizerConfig, SummaryDraft,
};
