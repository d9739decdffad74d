//! Error types for the Whodunit script generator.
//!
//! This crate provides the foundation error types used throughout the Whodunit workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use whodunit_error::{ServiceError, ServiceErrorKind, WhodunitResult};
//!
//! fn call_model() -> WhodunitResult<String> {
//!     Err(ServiceError::new(ServiceErrorKind::RateLimit))?
//! }
//!
//! match call_model() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod malformed;
mod missing_field;
mod pipeline;
mod service;
mod storage;

pub use builder::BuilderError;
pub use config::ConfigError;
pub use error::{WhodunitError, WhodunitErrorKind, WhodunitResult};
pub use malformed::MalformedOutputError;
pub use missing_field::MissingFieldError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use service::{ServiceError, ServiceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
