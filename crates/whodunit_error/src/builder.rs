//! Builder-related errors.

/// Error raised when a derived builder is missing a required field.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", message, line, file)]
pub struct BuilderError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BuilderError {
    /// Create a new BuilderError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use whodunit_error::BuilderError;
    ///
    /// let err = BuilderError::new("`messages` must be initialized");
    /// assert!(err.message.contains("messages"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
