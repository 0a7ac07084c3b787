use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::ParseError;
use crate::models::StoryResult;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("code fence pattern is valid")
});

/// Leftmost `{` through the rightmost `}` after it.
///
/// This is a greedy span, not a balanced-brace parse: two separate objects in
/// one reply come back as a single (usually invalid) span.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text[start..].rfind('}')? + start;
    Some(&text[start..=end])
}

/// Interior of the first fenced code block, with an optional `json` tag stripped.
pub fn fenced_block(text: &str) -> Option<&str> {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Picks the text that should hold the story JSON. Brace span wins over a
/// code fence.
pub fn json_candidate(raw: &str) -> Result<&str, ParseError> {
    let trimmed = raw.trim();
    if let Some(span) = brace_span(trimmed) {
        return Ok(span);
    }
    if let Some(block) = fenced_block(trimmed) {
        debug!("using fenced code block as JSON candidate");
        return Ok(block);
    }
    // An object that was opened but never closed is broken JSON, not absent JSON.
    if let Some(start) = trimmed.find('{') {
        return Ok(&trimmed[start..]);
    }
    Err(ParseError::NoJsonFound)
}

/// Pulls a [`StoryResult`] out of a provider's free-form reply.
///
/// No repair is attempted and no field is validated. Only a syntax error is a
/// failure; the document is kept as parsed and the typed view fills in what it can.
pub fn extract_story(raw: &str) -> Result<StoryResult, ParseError> {
    let candidate = json_candidate(raw)?;
    let document: Value =
        serde_json::from_str(candidate).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    Ok(StoryResult::from(document))
}
