//! Whodunit: murder-mystery script generation with language models.
//!
//! This facade re-exports the workspace crates and adds the pieces the
//! `whodunit` binary needs: layered configuration and logging setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use whodunit::{OpenAICompatibleClient, PromptDirectory, ScriptWriter, WhodunitConfig};
//!
//! let config = WhodunitConfig::load(None)?;
//! let driver = OpenAICompatibleClient::new(&config.model)?;
//! let writer = ScriptWriter::new(driver, PromptDirectory::bundled())
//!     .with_config(config.pipeline.clone())
//!     .with_sampling(config.sampling);
//! let script = writer.generate("万圣节恐怖之夜").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{PathsConfig, WhodunitConfig};
pub use observability::{LoggingConfig, init_logging};

// Re-export error types
pub use whodunit_error::{
    ConfigError, MalformedOutputError, MissingFieldError, PipelineError, PipelineErrorKind,
    ServiceError, ServiceErrorKind, StorageError, StorageErrorKind, WhodunitError,
    WhodunitErrorKind, WhodunitResult,
};

// Re-export core types
pub use whodunit_core::{GenerateRequest, GenerateResponse, Message, Role, SamplingParams, TokenUsage};

// Re-export collaborator traits
pub use whodunit_interface::{DocumentSink, GenerationDriver, TemplateSource};

// Re-export collaborators
pub use whodunit_models::{ModelConfig, OpenAICompatibleClient};
pub use whodunit_storage::{DocumentDirectory, PromptDirectory};

// Re-export the pipeline
pub use whodunit_pipeline::{
    Document, PipelineConfig, Script, ScriptWriter, Section, StageKind, StageResult,
};
