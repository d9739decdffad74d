//! Renderers from validated stage payloads to document prose.
//!
//! Every renderer is pure and tolerant of missing fields: absent values are
//! replaced by a placeholder and logged, never propagated.

mod character;
mod clues;
mod discussion;
mod fields;
mod latex;
mod premise;

pub use character::character;
pub use clues::clues;
pub use discussion::discussion;
pub use fields::{UNKNOWN, UNTITLED, text_field};
pub use latex::convert_latex_to_markdown;
pub use premise::{premise, roster_entries};
