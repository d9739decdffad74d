//! Staged script generation pipeline for Whodunit.
//!
//! This crate drives a generation model through the fixed stages of a
//! murder-mystery script:
//!
//! ```text
//! premise -> roster -> character (one per roster entry, concurrent) -> clues -> discussion
//! ```
//!
//! Every generation call goes through a [`RetryController`], which repairs
//! loosely structured model output into JSON with [`extract`] and degrades to
//! the last raw reply instead of failing. Validated payloads are rendered to
//! prose and the [`Document`] is assembled in roster order.
//!
//! # Example
//!
//! ```rust,ignore
//! use whodunit_pipeline::{PipelineConfig, ScriptWriter};
//! use whodunit_storage::PromptDirectory;
//!
//! let writer = ScriptWriter::new(driver, PromptDirectory::bundled())
//!     .with_config(PipelineConfig::default());
//! let script = writer.generate("万圣节恐怖之夜").await?;
//! println!("{}", script.document);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod config;
mod context;
mod executor;
mod extraction;
mod fanout;
mod prose;
mod retry;
mod stage;
mod template;

pub use assembler::{Document, Section};
pub use config::PipelineConfig;
pub use context::ScriptContext;
pub use executor::{Script, ScriptWriter};
pub use extraction::{Shape, extract, normalize_whitespace};
pub use fanout::map_concurrent;
pub use prose::convert_latex_to_markdown;
pub use retry::{Expectation, RetryController, StageOutcome};
pub use stage::{StageKind, StageResult};
pub use template::render;
