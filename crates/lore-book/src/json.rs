//! Plain JSON helpers used on raw document text.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::error::{BookError, Result};

/// Parse `text` as JSON, reporting the parser's message on failure.
pub fn validate_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| BookError::InvalidJson(e.to_string()))
}

/// Re-indent a JSON document; text that is not JSON is returned unchanged.
pub fn format_json(text: &str, indent: usize) -> String {
    match validate_json(text).and_then(|value| to_string_indented(&value, indent)) {
        Ok(formatted) => formatted,
        Err(_) => text.to_string(),
    }
}

/// Strip all insignificant whitespace; text that is not JSON is returned unchanged.
pub fn minify_json(text: &str) -> String {
    match validate_json(text) {
        Ok(value) => value.to_string(),
        Err(_) => text.to_string(),
    }
}

/// Serialize with `indent` spaces per level.
pub fn to_string_indented<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut ser)
        .map_err(|e| BookError::Serialization(e.to_string()))?;
    String::from_utf8(out).map_err(|e| BookError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_error_message() {
        assert!(validate_json(r#"{"a": 1}"#).is_ok());
        match validate_json("{oops") {
            Err(BookError::InvalidJson(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn format_uses_requested_indent() {
        assert_eq!(format_json(r#"{"a":[1]}"#, 2), "{\n  \"a\": [\n    1\n  ]\n}");
        assert_eq!(format_json(r#"{"a":1}"#, 4), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn format_and_minify_pass_invalid_text_through() {
        assert_eq!(format_json("not json", 2), "not json");
        assert_eq!(minify_json("not json"), "not json");
    }

    #[test]
    fn minify_keeps_key_order() {
        assert_eq!(minify_json("{ \"z\": 1,\n \"a\": 2 }"), r#"{"z":1,"a":2}"#);
    }
}
