//! Pipeline error types.

/// Specific error conditions for pipeline bookkeeping.
///
/// Generation failures never surface here; they degrade inside the retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A stage read an upstream result that has not been published yet
    #[display("Stage '{}' has not produced a result yet", _0)]
    MissingStage(String),
    /// A stage result was published twice
    #[display("Stage '{}' already published a result", _0)]
    StageAlreadyPublished(String),
    /// A prompt template could not be loaded
    #[display("Template for stage '{}' unavailable: {}", stage, message)]
    TemplateUnavailable {
        /// Stage name
        stage: String,
        /// Error message
        message: String,
    },
    /// Invalid pipeline configuration
    #[display("Configuration error: {}", _0)]
    ConfigurationError(String),
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use whodunit_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::MissingStage("roster".to_string()));
/// assert!(format!("{}", err).contains("roster"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
