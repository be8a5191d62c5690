//! Continuation pipeline error types.

/// Specific error conditions for the continuation pipeline.
///
/// The first five variants describe why a single attempt failed; the retry
/// controller consumes them internally and feeds the reason into the next
/// attempt's correction note. Only `ExhaustedRetries` crosses the pipeline
/// boundary to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Backend returned no usable structured payload
    #[display("No usable payload in backend response: {}", _0)]
    PayloadParse(String),
    /// Line or page count outside the kind's contract
    #[display("Bounds violation: {}", _0)]
    Bounds(String),
    /// Speaker/dialog adjacency broken
    #[display("Grammar violation: {}", _0)]
    Grammar(String),
    /// Continuation opens with a tag forbidden by the transition table
    #[display("First-line constraint violation: {}", _0)]
    FirstLineConstraint(String),
    /// Timeout or transport failure from the backend
    #[display("Model invocation failed: {}", _0)]
    Invocation(String),
    /// No attempt within the budget passed validation
    #[display("Exhausted {attempts} attempts; last failure: {last_reason}")]
    ExhaustedRetries {
        /// Number of attempts consumed
        attempts: u32,
        /// Failure reason of the final attempt
        last_reason: String,
    },
}

/// Error type for continuation pipeline operations.
///
/// # Examples
///
/// ```
/// use goldoni_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::ExhaustedRetries {
///     attempts: 3,
///     last_reason: "line count 9 below minimum 12".to_string(),
/// });
/// assert!(format!("{}", err).contains("Exhausted 3 attempts"));
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
