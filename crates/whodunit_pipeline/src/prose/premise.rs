//! Premise header and roster.

use super::fields::{UNKNOWN, UNTITLED, display_value, text_field};
use serde_json::Value as JsonValue;

/// Header block: title, player count, genre and introduction.
pub fn premise(payload: &JsonValue) -> String {
    format!(
        "#剧本名：{}\n#剧本人数：{}\n#剧本类型：{}\n#剧本简介：{}",
        text_field(payload, "title", UNTITLED),
        text_field(payload, "num", UNKNOWN),
        text_field(payload, "type", UNKNOWN),
        text_field(payload, "intro", UNKNOWN),
    )
}

/// Roster entries in order. Non-string entries become compact JSON.
pub fn roster_entries(payload: &JsonValue) -> Vec<String> {
    payload
        .as_array()
        .map(|entries| entries.iter().map(display_value).collect())
        .unwrap_or_default()
}
