//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, PipelineError};

/// This is the foundation error enum for the Goldoni workspace.
///
/// # Examples
///
/// ```
/// use goldoni_error::{GoldoniError, BackendError};
///
/// let backend_err = BackendError::new("Connection failed");
/// let err: GoldoniError = backend_err.into();
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GoldoniErrorKind {
    /// Generative backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Continuation pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Goldoni error with kind discrimination.
///
/// # Examples
///
/// ```
/// use goldoni_error::{GoldoniResult, ConfigError};
///
/// fn might_fail() -> GoldoniResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Goldoni Error: {}", _0)]
pub struct GoldoniError(Box<GoldoniErrorKind>);

impl GoldoniError {
    /// Create a new error from a kind.
    pub fn new(kind: GoldoniErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GoldoniErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GoldoniErrorKind
impl<T> From<T> for GoldoniError
where
    T: Into<GoldoniErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Goldoni operations.
///
/// # Examples
///
/// ```
/// use goldoni_error::{GoldoniResult, BackendError};
///
/// fn call_backend() -> GoldoniResult<String> {
///     Err(BackendError::new("503 Service Unavailable"))?
/// }
/// ```
pub type GoldoniResult<T> = std::result::Result<T, GoldoniError>;
