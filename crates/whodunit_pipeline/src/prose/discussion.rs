//! Panel discussion and resolution section.
//!
//! The layout is a fixed, ordered schema of optional sections. Each section
//! is written only when its key is present in the payload.

use super::fields::display_value;
use serde_json::Value as JsonValue;

/// How a section's value is laid out.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// A single value on one line
    Text,
    /// One line per array item
    Lines,
    /// One `- item` line per array item
    Bullets,
    /// One `key: value` line per object entry
    Pairs,
    /// Nested sections read from an object
    Nested(&'static [Section]),
}

#[derive(Debug, Clone, Copy)]
struct Section {
    key: &'static str,
    heading: &'static str,
    indent: &'static str,
    layout: Layout,
}

const RESOLUTION: &[Section] = &[
    Section {
        key: "圆桌答案",
        heading: "  圆桌答案:\n",
        indent: "    ",
        layout: Layout::Lines,
    },
    Section {
        key: "整体背景故事和设定",
        heading: "\n  整体背景故事和设定:\n",
        indent: "    ",
        layout: Layout::Text,
    },
    Section {
        key: "推理思路和关键线索",
        heading: "\n  推理思路和关键线索:\n",
        indent: "    ",
        layout: Layout::Bullets,
    },
    Section {
        key: "问题解答",
        heading: "\n  问题解答:\n",
        indent: "    ",
        layout: Layout::Pairs,
    },
    Section {
        key: "总时间线",
        heading: "\n  总时间线:\n",
        indent: "    ",
        layout: Layout::Pairs,
    },
];

const DISCUSSION: &[Section] = &[
    Section {
        key: "圆桌阶段",
        heading: "圆桌阶段：\n",
        indent: "  ",
        layout: Layout::Pairs,
    },
    Section {
        key: "真相解析",
        heading: "\n真相解析：\n",
        indent: "",
        layout: Layout::Nested(RESOLUTION),
    },
    Section {
        key: "故事结局",
        heading: "\n故事结局:\n",
        indent: "  ",
        layout: Layout::Text,
    },
];

/// Render the discussion payload.
///
/// A payload carrying none of the known sections is written as its JSON text.
pub fn discussion(payload: &JsonValue) -> String {
    let text = render_sections(payload, DISCUSSION);
    if text.is_empty() {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    } else {
        text
    }
}

fn render_sections(payload: &JsonValue, sections: &[Section]) -> String {
    let mut text = String::new();
    for section in sections {
        if let Some(value) = payload.get(section.key) {
            text.push_str(section.heading);
            render_value(&mut text, value, section);
        }
    }
    text
}

fn render_value(text: &mut String, value: &JsonValue, section: &Section) {
    let indent = section.indent;
    match section.layout {
        Layout::Text => text.push_str(&format!("{indent}{}\n", display_value(value))),
        Layout::Lines => {
            for item in items(value) {
                text.push_str(&format!("{indent}{}\n", display_value(item)));
            }
        }
        Layout::Bullets => {
            for item in items(value) {
                text.push_str(&format!("{indent}- {}\n", display_value(item)));
            }
        }
        Layout::Pairs => match value.as_object() {
            Some(entries) => {
                for (key, item) in entries {
                    text.push_str(&format!("{indent}{key}: {}\n", display_value(item)));
                }
            }
            None => text.push_str(&format!("{indent}{}\n", display_value(value))),
        },
        Layout::Nested(children) => text.push_str(&render_sections(value, children)),
    }
}

/// Array items, or the value itself when it is a scalar.
fn items(value: &JsonValue) -> Vec<&JsonValue> {
    match value {
        JsonValue::Array(list) => list.iter().collect(),
        other => vec![other],
    }
}
