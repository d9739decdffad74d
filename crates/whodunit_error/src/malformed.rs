//! Structured-output repair errors.

/// Raised when no valid structure can be recovered from model output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed Output: {} at line {} in {}", message, line, file)]
pub struct MalformedOutputError {
    /// What went wrong during repair or parsing
    pub message: String,
    /// Length of the raw text that failed to parse
    pub raw_len: usize,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MalformedOutputError {
    /// Create a new MalformedOutputError for a raw response of `raw_len` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use whodunit_error::MalformedOutputError;
    ///
    /// let err = MalformedOutputError::new("no opening '{' found", 42);
    /// assert_eq!(err.raw_len, 42);
    /// assert!(format!("{}", err).contains("opening"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>, raw_len: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            raw_len,
            line: location.line(),
            file: location.file(),
        }
    }
}
