//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, MalformedOutputError, MissingFieldError, PipelineError,
    ServiceError, StorageError,
};

/// Every error condition the workspace can raise.
///
/// # Examples
///
/// ```
/// use whodunit_error::{ConfigError, WhodunitError};
///
/// let err: WhodunitError = ConfigError::new("bad timeout").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WhodunitErrorKind {
    /// Generation service failure
    #[from(ServiceError)]
    Service(ServiceError),
    /// Model output could not be repaired into structured data
    #[from(MalformedOutputError)]
    MalformedOutput(MalformedOutputError),
    /// Renderer field lookup failed
    #[from(MissingFieldError)]
    MissingField(MissingFieldError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Pipeline bookkeeping error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Whodunit error with kind discrimination.
///
/// # Examples
///
/// ```
/// use whodunit_error::{MalformedOutputError, WhodunitErrorKind, WhodunitResult};
///
/// fn parse() -> WhodunitResult<()> {
///     Err(MalformedOutputError::new("no closing ']' found", 10))?
/// }
///
/// let err = parse().unwrap_err();
/// assert!(matches!(err.kind(), WhodunitErrorKind::MalformedOutput(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Whodunit Error: {}", _0)]
pub struct WhodunitError(Box<WhodunitErrorKind>);

impl WhodunitError {
    /// Create a new error from a kind.
    pub fn new(kind: WhodunitErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WhodunitErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to WhodunitErrorKind
impl<T> From<T> for WhodunitError
where
    T: Into<WhodunitErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Whodunit operations.
pub type WhodunitResult<T> = std::result::Result<T, WhodunitError>;
