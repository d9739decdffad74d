//! Prompt template and script document storage for Whodunit.
//!
//! - [`PromptDirectory`] serves prompt templates from an optional override
//!   directory, falling back to the templates bundled with this crate.
//! - [`DocumentDirectory`] writes finished scripts as Markdown files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod documents;
mod prompts;

pub use documents::DocumentDirectory;
pub use prompts::{BUNDLED_TEMPLATES, PromptDirectory};
