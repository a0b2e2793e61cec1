//! Redaction of sensitive request fields and summarising of oversized
//! response payloads before they reach the audit log.

use serde_json::{Value, json};

/// Responses above this size are stored as a summary, not verbatim.
pub const RESPONSE_CAPTURE_LIMIT: usize = 8 * 1024;

const REDACTED: &str = "[REDACTED]";

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("password")
        || key.contains("token")
        || key.contains("apikey")
        || key.contains("api_key")
        || key.contains("secret")
}

/// Replace the values of sensitive keys, recursively through objects and
/// arrays. Everything else is passed through untouched.
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    if is_sensitive(k) {
                        (k.clone(), Value::String(REDACTED.into()))
                    } else {
                        (k.clone(), redact_json(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        other => other.clone(),
    }
}

/// The stored representation of a response body: verbatim JSON when it
/// parses and fits under [`RESPONSE_CAPTURE_LIMIT`], otherwise a
/// size/type summary.
pub fn summarize_response(body: &[u8], content_type: Option<&str>) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    if body.len() > RESPONSE_CAPTURE_LIMIT {
        return json!({
            "truncated": true,
            "bytes": body.len(),
            "content_type": content_type,
        });
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => redact_json(&value),
        Err(_) => json!({
            "bytes": body.len(),
            "content_type": content_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_keys_are_redacted_at_any_depth() {
        let input = json!({
            "email": "a@example.com",
            "password": "hunter2",
            "nested": {
                "apiKey": "abc",
                "api_key": "def",
                "refreshToken": "xyz",
                "note": "keep me"
            },
            "items": [{"clientSecret": "s3cret"}]
        });

        let out = redact_json(&input);
        assert_eq!(out["email"], "a@example.com");
        assert_eq!(out["password"], REDACTED);
        assert_eq!(out["nested"]["apiKey"], REDACTED);
        assert_eq!(out["nested"]["api_key"], REDACTED);
        assert_eq!(out["nested"]["refreshToken"], REDACTED);
        assert_eq!(out["nested"]["note"], "keep me");
        assert_eq!(out["items"][0]["clientSecret"], REDACTED);
    }

    #[test]
    fn small_json_response_is_stored_redacted() {
        let body = br#"{"id": 1, "token": "abc"}"#;
        let out = summarize_response(body, Some("application/json"));
        assert_eq!(out["id"], 1);
        assert_eq!(out["token"], REDACTED);
    }

    #[test]
    fn oversized_response_becomes_a_summary() {
        let body = vec![b'x'; RESPONSE_CAPTURE_LIMIT + 1];
        let out = summarize_response(&body, Some("application/json"));
        assert_eq!(out["truncated"], true);
        assert_eq!(out["bytes"], RESPONSE_CAPTURE_LIMIT + 1);
    }

    #[test]
    fn non_json_response_is_summarized() {
        let out = summarize_response(b"<html></html>", Some("text/html"));
        assert_eq!(out["bytes"], 13);
        assert_eq!(out["content_type"], "text/html");
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(summarize_response(b"", None), Value::Null);
    }
}
