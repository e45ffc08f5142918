//! Defensive parsing of the selection model's reply.
//!
//! The reply is untrusted free text. The parser isolates the narrowest
//! JSON-array-shaped substring, validates every element, and falls back to
//! the most recent messages when nothing usable remains. It never fails.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// First bracketed run of digits, commas and whitespace.
static INDEX_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\d\s,]*\]").expect("static regex is valid"));

/// Parse a selection reply into indices into a list of `message_count`
/// messages.
///
/// The result holds distinct indices in `[0, message_count)`, in the order
/// the model listed them, at most `max_count` long. When the reply is
/// unusable the last `min(max_count, message_count)` indices are returned
/// instead. Only an empty input range (`message_count == 0` or
/// `max_count == 0`) yields an empty result.
pub fn parse_indices(raw: &str, message_count: usize, max_count: usize) -> Vec<usize> {
    if message_count == 0 || max_count == 0 {
        return Vec::new();
    }

    let cleaned = strip_code_fences(raw.trim());
    let candidate = INDEX_ARRAY
        .find(&cleaned)
        .map(|m| m.as_str())
        .unwrap_or(cleaned.as_str());

    let values = match serde_json::from_str::<Vec<serde_json::Value>>(candidate) {
        Ok(values) => values,
        Err(e) => {
            debug!(error = %e, "Selection reply is not a JSON array, using most recent messages");
            return most_recent(message_count, max_count);
        }
    };

    let mut seen = HashSet::new();
    let indices: Vec<usize> = values
        .iter()
        .filter_map(|v| v.as_u64())
        .filter_map(|v| usize::try_from(v).ok())
        .filter(|&i| i < message_count)
        .filter(|&i| seen.insert(i))
        .take(max_count)
        .collect();

    if indices.is_empty() {
        debug!(
            returned = values.len(),
            "Selection reply had no valid indices, using most recent messages"
        );
        return most_recent(message_count, max_count);
    }

    indices
}

/// The last `min(max_count, message_count)` indices, ascending.
pub fn most_recent(message_count: usize, max_count: usize) -> Vec<usize> {
    let take = max_count.min(message_count);
    (message_count - take..message_count).collect()
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}
