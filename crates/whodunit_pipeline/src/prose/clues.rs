//! Clue search section.

use super::fields::{UNKNOWN, display_value, text_field};
use serde_json::Value as JsonValue;

/// Render scenes as a name followed by numbered clues.
///
/// The payload maps a scene key to `{"场景名称": .., "线索": [..]}`.
pub fn clues(payload: &JsonValue) -> String {
    let mut text = String::new();
    let Some(scenes) = payload.as_object() else {
        return text;
    };

    for scene in scenes.values() {
        text.push_str(&format!("\n场景：{}\n", text_field(scene, "场景名称", UNKNOWN)));
        text.push_str("线索：\n");
        let items = scene.get("线索").and_then(JsonValue::as_array);
        for (idx, clue) in items.into_iter().flatten().enumerate() {
            text.push_str(&format!("  {}. {}\n", idx + 1, display_value(clue)));
        }
    }

    text
}
