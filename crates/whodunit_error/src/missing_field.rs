//! Renderer field errors.

/// A renderer looked up a field the payload does not carry.
///
/// Renderers substitute a placeholder instead of propagating this error;
/// it exists so the substitution can be logged with a uniform shape.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Missing Field: '{}' at line {} in {}", field, line, file)]
pub struct MissingFieldError {
    /// Name of the absent field
    pub field: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MissingFieldError {
    /// Create a new MissingFieldError for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use whodunit_error::MissingFieldError;
    ///
    /// let err = MissingFieldError::new("title");
    /// assert_eq!(err.field, "title");
    /// ```
    #[track_caller]
    pub fn new(field: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            field: field.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
