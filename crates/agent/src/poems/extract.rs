//! Turning raw model output into validated artifacts.
//!
//! Models disagree on how to wrap a JSON array when asked for a JSON
//! object, so extraction walks an ordered list of strategies and takes the
//! first that matches.

use folio_core::PoemArtifact;
use serde_json::Value;

use super::PoemError;

/// Object keys that commonly wrap the array, in preference order.
const WRAPPER_KEYS: &[&str] = &["haikus", "result", "data", "items"];

type Strategy = fn(&Value) -> Option<&Vec<Value>>;

/// Extraction strategies, first match wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("raw_array", raw_array),
    ("wrapper_key", wrapper_key),
    ("first_array", first_array),
];

fn raw_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

fn wrapper_key(value: &Value) -> Option<&Vec<Value>> {
    let object = value.as_object()?;
    WRAPPER_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
}

fn first_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_object()?.values().find_map(Value::as_array)
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string on the opening line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse raw model output and return the candidate entries.
pub fn extract_candidates(raw: &str) -> Result<Vec<Value>, PoemError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;

    for (name, strategy) in STRATEGIES {
        if let Some(items) = strategy(&value) {
            tracing::debug!(strategy = *name, candidates = items.len(), "Poem array extracted");
            return Ok(items.clone());
        }
    }

    Err(PoemError::NoArray)
}

/// Keep only candidates with all four fields as non-empty strings and
/// exactly three non-empty lines.
pub fn validate(candidates: Vec<Value>) -> Vec<PoemArtifact> {
    candidates
        .into_iter()
        .filter_map(|candidate| serde_json::from_value::<PoemArtifact>(candidate).ok())
        .filter(PoemArtifact::is_complete)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn poem(id: &str) -> Value {
        json!({
            "id": id,
            "lines": ["Old pond, still water", "A frog leaps into the splash", "Silence then again"],
            "fact": "A real fact.",
            "emoji": "🐸"
        })
    }

    #[test]
    fn raw_array_accepted() {
        let raw = json!([poem("a"), poem("b")]).to_string();
        assert_eq!(extract_candidates(&raw).unwrap().len(), 2);
    }

    #[test]
    fn wrapper_keys_in_order() {
        let raw = json!({
            "items": [poem("from-items")],
            "haikus": [poem("from-haikus"), poem("second")]
        })
        .to_string();
        let candidates = extract_candidates(&raw).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["id"], "from-haikus");
    }

    #[test]
    fn wrapper_key_must_hold_an_array() {
        let raw = json!({"haikus": "none", "poems": [poem("fallthrough")]}).to_string();
        let candidates = extract_candidates(&raw).unwrap();
        assert_eq!(candidates[0]["id"], "fallthrough");
    }

    #[test]
    fn first_array_value_in_document_order() {
        let raw = r#"{"note": "ok", "zeta": [{"id": "z"}], "alpha": [{"id": "a"}]}"#;
        let candidates = extract_candidates(raw).unwrap();
        assert_eq!(candidates[0]["id"], "z");
    }

    #[test]
    fn no_array_is_an_error() {
        assert!(matches!(extract_candidates(r#"{"haiku": "one"}"#), Err(PoemError::NoArray)));
        assert!(matches!(extract_candidates("42"), Err(PoemError::NoArray)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(extract_candidates("Here are your haikus:"), Err(PoemError::Parse(_))));
    }

    #[test]
    fn code_fence_stripped() {
        let raw = format!("```json\n{}\n```", json!([poem("fenced")]));
        let candidates = extract_candidates(&raw).unwrap();
        assert_eq!(candidates[0]["id"], "fenced");

        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  [1]  "), "[1]");
    }

    #[test]
    fn validation_discards_nonconforming_entries() {
        let mut two_lines = poem("two-lines");
        two_lines["lines"] = json!(["one", "two"]);
        let mut blank_fact = poem("blank-fact");
        blank_fact["fact"] = json!("");
        let mut numeric_lines = poem("numeric");
        numeric_lines["lines"] = json!([5, 7, 5]);
        let mut missing_emoji = poem("no-emoji");
        missing_emoji.as_object_mut().unwrap().remove("emoji");

        let valid = validate(vec![
            poem("good"),
            two_lines,
            blank_fact,
            numeric_lines,
            missing_emoji,
            json!("not an object"),
        ]);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "good");
    }
}
