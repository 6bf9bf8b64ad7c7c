// Extraction of a single JSON object from free-form model output.

use serde_json::Value;

/// Pulls one JSON object out of an LLM response.
///
/// Order of attempts:
/// 1. strict parse of the whole (fence-stripped) text;
/// 2. parse of the first top-level balanced `{…}` span.
///
/// Returns `None` when the text contains no parseable object; callers map
/// that to their malformed-response error with the raw text attached.
pub fn parse_object(raw: &str) -> Option<Value> {
    let text = strip_code_fence(raw.trim());

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return Some(value);
        }
    }

    let span = balanced_object_span(text)?;
    match serde_json::from_str::<Value>(span) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

/// Strips a surrounding markdown code fence (``` or ```json), if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.find("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// First top-level balanced brace pair, ignoring braces inside strings.
fn balanced_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let candidate = &text[start..];

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    for (i, ch) in candidate.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&candidate[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
