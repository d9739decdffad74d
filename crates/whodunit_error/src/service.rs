//! Generation service error types.

/// Specific failure conditions of the remote generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServiceErrorKind {
    /// Transport-level failure (connection, TLS, timeout)
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Service answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Credentials rejected
    #[display("Authentication failed: {}", _0)]
    Unauthorized(String),
    /// Rate limit exceeded
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response contained no generated text
    #[display("Response contained no choices")]
    EmptyResponse,
}

/// Error returned by a generation driver.
///
/// # Examples
///
/// ```
/// use whodunit_error::{ServiceError, ServiceErrorKind};
///
/// let err = ServiceError::new(ServiceErrorKind::Api {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service Error: {} at line {} in {}", kind, line, file)]
pub struct ServiceError {
    /// The specific error condition
    pub kind: ServiceErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ServiceError {
    /// Create a new ServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
