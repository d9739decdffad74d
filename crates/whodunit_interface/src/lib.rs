//! Collaborator traits for the Whodunit script generator.
//!
//! The pipeline owns no I/O. It talks to three collaborators:
//!
//! - [`GenerationDriver`] sends a conversation to a text-generation service
//! - [`TemplateSource`] loads prompt templates by name
//! - [`DocumentSink`] persists the finished script

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{DocumentSink, GenerationDriver, TemplateSource};
