//! Backend error types.

/// Generative backend error with source location.
///
/// Covers transport failures, timeouts, and non-success statuses from
/// whatever driver implementation the caller injected.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use goldoni_error::BackendError;
    ///
    /// let err = BackendError::new("Backend service unavailable");
    /// assert!(err.message.contains("unavailable"));
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
