//! Recovery of structured data from free-form model replies.
//!
//! Models wrap JSON in prose or markdown fences. The repair here is a fixed
//! two-step delimiter trim: it only ever removes noise before the first
//! opening delimiter and after the first closing delimiter, and never edits
//! anything between them.

use serde_json::Value as JsonValue;
use whodunit_error::{MalformedOutputError, WhodunitResult};

/// Top-level structure a stage expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Shape {
    /// A JSON object, delimited by `{` and `}`
    #[strum(serialize = "object")]
    Object,
    /// A JSON array, delimited by `[` and `]`
    #[strum(serialize = "array")]
    Array,
}

impl Shape {
    /// Opening delimiter.
    pub fn open(self) -> char {
        match self {
            Shape::Object => '{',
            Shape::Array => '[',
        }
    }

    /// Closing delimiter.
    pub fn close(self) -> char {
        match self {
            Shape::Object => '}',
            Shape::Array => ']',
        }
    }
}

/// Extract a JSON payload of the given shape from a raw reply.
///
/// 1. Trim surrounding whitespace.
/// 2. If the text does not start with the opening delimiter, drop everything
///    before its first occurrence.
/// 3. If the text does not end with the closing delimiter, drop everything
///    after its first occurrence.
/// 4. Parse what is left.
///
/// # Errors
///
/// Returns a `MalformedOutputError` if either delimiter is missing or the
/// trimmed text is not valid JSON.
///
/// # Examples
///
/// ```
/// use whodunit_pipeline::{Shape, extract};
///
/// let raw = "好的，以下是角色列表：\n[\"林雪\", \"刀鱼哥\"]\n希望对你有帮助";
/// let roster = extract(raw, Shape::Array).unwrap();
/// assert_eq!(roster[1], "刀鱼哥");
///
/// assert!(extract("no structure here", Shape::Object).is_err());
/// ```
pub fn extract(raw: &str, shape: Shape) -> WhodunitResult<JsonValue> {
    let (open, close) = (shape.open(), shape.close());
    let mut text = raw.trim();

    if !text.starts_with(open) {
        let start = text.find(open).ok_or_else(|| {
            MalformedOutputError::new(format!("no opening '{open}' found"), raw.len())
        })?;
        text = &text[start..];
    }

    if !text.ends_with(close) {
        let end = text.find(close).ok_or_else(|| {
            MalformedOutputError::new(format!("no closing '{close}' found"), raw.len())
        })?;
        text = &text[..end + close.len_utf8()];
    }

    serde_json::from_str(text).map_err(|e| {
        let preview = text.chars().take(100).collect::<String>();

        tracing::debug!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        MalformedOutputError::new(format!("failed to parse {shape}: {e}"), raw.len()).into()
    })
}

/// Flatten line breaks and collapse whitespace runs to a single space.
///
/// Used ahead of [`extract`] for replies whose JSON is wrapped across lines
/// in ways that break parsing (raw newlines inside string values).
///
/// # Examples
///
/// ```
/// use whodunit_pipeline::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("{\"a\":\r\n  \"x\n y\"}"), "{\"a\": \"x y\"}");
/// ```
pub fn normalize_whitespace(raw: &str) -> String {
    raw.replace('\n', " ")
        .replace('\r', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_object_parses_unchanged() {
        let value = extract(r#"{"title":"T","num":4}"#, Shape::Object).unwrap();
        assert_eq!(value, json!({"title": "T", "num": 4}));
    }

    #[test]
    fn test_prose_and_fences_are_trimmed() {
        let raw = r#"
Here's the JSON you requested:

```json
{"title": "雪夜", "num": 6, "intro": "I", "type": "推理"}
```

Hope this helps!
"#;
        let value = extract(raw, Shape::Object).unwrap();
        assert_eq!(value["title"], "雪夜");
        assert_eq!(value["num"], 6);
    }

    #[test]
    fn test_noise_without_delimiters_recovers_exact_payload() {
        let payloads = [
            r#"{"a":"x","b":[1,2,3],"c":null}"#,
            r#"{"场景名称":"Hall","线索":["key","note"]}"#,
            r#"{}"#,
        ];
        for payload in payloads {
            let expected: JsonValue = serde_json::from_str(payload).unwrap();
            let raw = format!("Sure! Output follows:\n{payload}\n-- end of output --");
            assert_eq!(extract(&raw, Shape::Object).unwrap(), expected);
        }

        let expected = json!(["A", "B", "C"]);
        let raw = "roster: [\"A\",\"B\",\"C\"] (4 players?)";
        assert_eq!(extract(raw, Shape::Array).unwrap(), expected);
    }

    #[test]
    fn test_nested_object_with_prefix_noise() {
        let raw = r#"输出：{"scene1":{"场景名称":"Hall","线索":["key"]}}"#;
        let value = extract(raw, Shape::Object).unwrap();
        assert_eq!(value["scene1"]["线索"][0], "key");
    }

    #[test]
    fn test_trailing_noise_cuts_at_first_closing_delimiter() {
        // The first '}' ends the candidate, so a nested object followed by
        // noise is truncated and rejected rather than guessed at.
        let raw = r#"{"a":{"b":1}} trailing"#;
        assert!(extract(raw, Shape::Object).is_err());
    }

    #[test]
    fn test_missing_opening_delimiter_fails() {
        let err = extract("just prose, no braces at all", Shape::Object).unwrap_err();
        assert!(format!("{}", err).contains("no opening"));
    }

    #[test]
    fn test_missing_closing_delimiter_fails() {
        let err = extract(r#"{"title": "truncated"#, Shape::Object).unwrap_err();
        assert!(format!("{}", err).contains("no closing"));
    }

    #[test]
    fn test_invalid_json_between_delimiters_fails() {
        assert!(extract("{title: T}", Shape::Object).is_err());
    }

    #[test]
    fn test_array_shape_ignores_braces() {
        let raw = "前言 [\"甲\", \"乙\"]";
        let value = extract(raw, Shape::Array).unwrap();
        assert_eq!(value, json!(["甲", "乙"]));
    }

    #[test]
    fn test_array_reply_does_not_satisfy_object_shape() {
        assert!(extract("[1, 2]", Shape::Object).is_err());
    }

    #[test]
    fn test_normalize_then_extract_recovers_multiline_strings() {
        let raw = "{\"故事结局\": \"第一行\n第二行\"}";
        assert!(extract(raw, Shape::Object).is_err());
        let value = extract(&normalize_whitespace(raw), Shape::Object).unwrap();
        assert_eq!(value["故事结局"], "第一行 第二行");
    }
}
