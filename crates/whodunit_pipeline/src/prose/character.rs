//! Character sections.

use super::fields::{UNTITLED, display_value, text_field};
use super::latex::convert_latex_to_markdown;
use serde_json::Value as JsonValue;

/// Render a character reply.
///
/// Prose gets its display math rewritten. An object (the fenced JSON form)
/// is rendered as a profile.
pub fn character(payload: &JsonValue) -> String {
    match payload {
        JsonValue::String(prose) => convert_latex_to_markdown(prose),
        JsonValue::Object(_) => profile(payload),
        other => other.to_string(),
    }
}

fn profile(payload: &JsonValue) -> String {
    let intro = payload.get("intro").cloned().unwrap_or(JsonValue::Null);
    let mut text = format!(
        "书名：{}\n简介：{}\n\n人物：{} ({}岁，职业：{})\n",
        text_field(&intro, "title", UNTITLED),
        text_field(&intro, "intro", "未提供简介"),
        text_field(payload, "character", "未知角色"),
        text_field(payload, "age", "未知年龄"),
        text_field(payload, "profession", "未知职业"),
    );

    let secrets = payload
        .get("secrets")
        .and_then(JsonValue::as_object)
        .filter(|s| !s.is_empty());
    if let Some(secrets) = secrets {
        text.push_str("人物秘密：\n");
        for (kind, description) in secrets {
            text.push_str(&format!("- {}: {}\n", kind, display_value(description)));
        }
    }

    text
}
