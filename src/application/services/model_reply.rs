//! Parsing and validation of the model's JSON reply.
//!
//! The model is asked for a raw JSON object, but replies routinely arrive
//! wrapped in prose or code fences. Parsing is therefore two-stage: direct
//! parse first, then a repair pass that slices from the first `{` to the
//! last `}` and retries. Anything beyond that is a hard failure carrying a
//! truncated excerpt for diagnostics.

use serde::Deserialize;

/// Placeholder keywords persisted when the model returns none.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["document", "summary", "analysis"];

/// Titles are truncated to this many characters at persistence time.
pub const MAX_TITLE_CHARS: usize = 140;

const EXCERPT_CHARS: usize = 300;

/// Validated model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub title: Option<String>,
    pub summary: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("model did not return usable summary JSON (excerpt: {excerpt})")]
pub struct ReplyParseError {
    pub excerpt: String,
}

#[derive(Deserialize)]
struct RawReply {
    title: Option<String>,
    summary: String,
    #[serde(default)]
    keywords: serde_json::Value,
}

/// Parses the raw model text into a validated [`ModelReply`].
///
/// Keywords are normalized to a non-empty list of strings: non-string
/// entries are dropped and an empty or non-array value is replaced with
/// [`DEFAULT_KEYWORDS`].
pub fn parse_reply(raw: &str) -> Result<ModelReply, ReplyParseError> {
    if let Some(reply) = try_parse(raw) {
        return Ok(reply);
    }

    // Repair pass: the object is often embedded in surrounding prose.
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Some(reply) = try_parse(&raw[start..=end]) {
                return Ok(reply);
            }
        }
    }

    Err(ReplyParseError {
        excerpt: excerpt(raw),
    })
}

fn try_parse(candidate: &str) -> Option<ModelReply> {
    let raw: RawReply = serde_json::from_str(candidate.trim()).ok()?;

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let keywords = normalize_keywords(raw.keywords);

    Some(ModelReply {
        title,
        summary: raw.summary,
        keywords,
    })
}

fn normalize_keywords(value: serde_json::Value) -> Vec<String> {
    let keywords: Vec<String> = match value {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(s) if !s.trim().is_empty() => {
                    Some(s.trim().to_string())
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
    } else {
        keywords
    }
}

fn excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_json_parses() {
        let reply =
            parse_reply(r#"{"title":"T","summary":"S","keywords":["a","b"]}"#).unwrap();
        assert_eq!(reply.title.as_deref(), Some("T"));
        assert_eq!(reply.summary, "S");
        assert_eq!(reply.keywords, vec!["a", "b"]);
    }

    #[test]
    fn embedded_object_is_recovered_from_surrounding_prose() {
        let raw = r#"Here is the result: {"summary":"ok","keywords":["a","b"]} Thanks!"#;
        let reply = parse_reply(raw).unwrap();
        assert_eq!(reply.summary, "ok");
        assert_eq!(reply.keywords, vec!["a", "b"]);
        assert_eq!(reply.title, None);
    }

    #[test]
    fn garbage_fails_with_excerpt() {
        let err = parse_reply("I could not summarize that.").unwrap_err();
        assert!(err.excerpt.contains("could not summarize"));
    }

    #[test]
    fn missing_summary_is_a_hard_failure() {
        assert!(parse_reply(r#"{"title":"only a title"}"#).is_err());
    }

    #[test]
    fn empty_keywords_fall_back_to_default_triple() {
        let reply = parse_reply(r#"{"summary":"s","keywords":[]}"#).unwrap();
        assert_eq!(reply.keywords, DEFAULT_KEYWORDS.map(String::from).to_vec());
    }

    #[test]
    fn non_string_keyword_entries_are_dropped() {
        let reply =
            parse_reply(r#"{"summary":"s","keywords":["a",7,null,{"x":1},"b"]}"#).unwrap();
        assert_eq!(reply.keywords, vec!["a", "b"]);
    }

    #[test]
    fn non_array_keywords_get_the_default_triple() {
        let reply = parse_reply(r#"{"summary":"s","keywords":"alpha, beta"}"#).unwrap();
        assert_eq!(reply.keywords.len(), 3);
    }

    #[test]
    fn blank_title_is_treated_as_absent() {
        let reply = parse_reply(r#"{"title":"   ","summary":"s","keywords":["k"]}"#).unwrap();
        assert_eq!(reply.title, None);
    }
}
