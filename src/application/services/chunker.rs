/// Default window size for piecewise summarization, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 9_000;

/// Splits text into contiguous, non-overlapping windows of `chunk_size`
/// characters; the final window may be shorter. Purely positional, no
/// sentence-boundary awareness. Empty or whitespace-only input yields an
/// empty vec.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = trimmed.chars().collect();

    chars
        .chunks(chunk_size)
        .map(|window| window.iter().collect())
        .collect()
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_input_yield_no_chunks() {
        assert!(chunk_text("", 10).is_empty());
        assert!(chunk_text("   \n\t ", 10).is_empty());
    }

    #[test]
    fn exact_multiple_splits_without_remainder() {
        let chunks = chunk_text(&"a".repeat(30), 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() == 10));
    }

    #[test]
    fn remainder_lands_in_shorter_final_chunk() {
        let chunks = chunk_text(&"b".repeat(25), 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].chars().count(), 5);
    }

    #[test]
    fn chunking_counts_characters_not_bytes() {
        let text = "ü".repeat(12);
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 10);
        assert_eq!(chunks[1].chars().count(), 2);
    }

    #[test]
    fn truncate_chars_is_code_point_safe() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 4), "héll");
        assert_eq!(truncate_chars(text, 100), text);
    }
}
