//! Prompt templates for the summarization model.
//!
//! All prompts demand raw JSON output with the shape
//! `{"title": string?, "summary": string, "keywords": string[]}` so the
//! reply parser can stay strict.

/// Character thresholds for the target sentence-count band.
const MEDIUM_DOCUMENT_CHARS: usize = 12_000;
const LONG_DOCUMENT_CHARS: usize = 40_000;

const SECTION_TEMPLATE: &str = "purpose and scope; key concepts; \
architecture or mechanism; components and examples; comparison with \
alternatives where applicable; conclusion";

/// Target sentence count for the final summary, chosen by input length.
pub fn sentence_band(input_chars: usize) -> &'static str {
    if input_chars > LONG_DOCUMENT_CHARS {
        "34-45"
    } else if input_chars > MEDIUM_DOCUMENT_CHARS {
        "24-34"
    } else {
        "16-22"
    }
}

/// Prompt for the single-call path (short/medium text and/or images).
pub fn direct_prompt(band: &str) -> String {
    format!(
        "You are an academic summarization assistant. Read the attached \
document content (text and/or page images) and produce a structured \
academic summary covering: {SECTION_TEMPLATE}. Write {band} sentences in \
the same language as the document. Respond with a single raw JSON object \
and nothing else: {{\"title\": string, \"summary\": string, \
\"keywords\": string[]}} with 5-10 keywords. No markdown, no code fences, \
no commentary."
    )
}

/// Tighter prompt for one chunk of a long document.
pub fn chunk_prompt(index: usize, total: usize) -> String {
    format!(
        "You are summarizing part {index} of {total} of a long document. \
Summarize only this part in 10-14 sentences, in the document's own \
language, and extract 6-10 keywords. Respond with a single raw JSON \
object and nothing else: {{\"summary\": string, \"keywords\": string[]}}. \
No markdown, no commentary."
    )
}

/// Merge prompt combining ordered partial summaries into one final summary.
pub fn merge_prompt(band: &str, partials: &[String]) -> String {
    let mut labeled = String::new();
    for (i, partial) in partials.iter().enumerate() {
        labeled.push_str(&format!("CHUNK_{}:\n{}\n\n", i + 1, partial));
    }
    format!(
        "Below are ordered partial summaries (CHUNK_1..CHUNK_{total}) of \
one document. Merge them into a single coherent academic summary covering: \
{SECTION_TEMPLATE}. Write {band} sentences in the same language as the \
partial summaries. Respond with a single raw JSON object and nothing \
else: {{\"title\": string, \"summary\": string, \"keywords\": string[]}}. \
No markdown, no commentary.\n\n{labeled}",
        total = partials.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_selection_follows_length_thresholds() {
        assert_eq!(sentence_band(500), "16-22");
        assert_eq!(sentence_band(12_000), "16-22");
        assert_eq!(sentence_band(15_000), "24-34");
        assert_eq!(sentence_band(40_000), "24-34");
        assert_eq!(sentence_band(40_001), "34-45");
    }

    #[test]
    fn merge_prompt_labels_chunks_in_document_order() {
        let prompt = merge_prompt("24-34", &["first".into(), "second".into()]);
        let a = prompt.find("CHUNK_1:").unwrap();
        let b = prompt.find("CHUNK_2:").unwrap();
        assert!(a < b);
        assert!(prompt.contains("CHUNK_1..CHUNK_2"));
    }
}
