//! Continuation request types.

use crate::{ContinuationKind, DocumentContext, ScriptMetadata};
use serde::{Deserialize, Serialize};

/// One request to continue a script.
///
/// Created fresh per request and discarded after the result is returned; the
/// pipeline holds no state across requests.
///
/// # Examples
///
/// ```
/// use goldoni_core::{ContinuationKind, ContinuationRequest, DocumentContext};
///
/// let request = ContinuationRequest::builder()
///     .context(DocumentContext::empty())
///     .instruction("Open on a rain-soaked street.".to_string())
///     .kind(ContinuationKind::ShortContinuation)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.attempt_budget(), 3);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
pub struct ContinuationRequest {
    /// Immutable snapshot of the existing script
    context: DocumentContext,
    /// What the writer asked for
    instruction: String,
    /// Which bounds/attachment contract applies
    kind: ContinuationKind,
    /// Override for the kind's default attempt budget
    #[builder(default)]
    max_attempts: Option<u32>,
    /// Title/description forwarded to the prompt
    #[builder(default)]
    metadata: ScriptMetadata,
}

impl ContinuationRequest {
    /// Start building a request.
    pub fn builder() -> ContinuationRequestBuilder {
        ContinuationRequestBuilder::default()
    }

    /// The attempt budget for this request: the explicit override if one was
    /// given, otherwise the kind's contract default. Always at least 1.
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts
            .unwrap_or(*self.kind.contract().max_attempts())
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_budget_defaults_from_contract() {
        let request = ContinuationRequest::builder()
            .context(DocumentContext::empty())
            .instruction("go".to_string())
            .kind(ContinuationKind::FullGeneration)
            .build()
            .unwrap();
        assert_eq!(request.attempt_budget(), 4);
    }

    #[test]
    fn test_attempt_budget_override_clamped_to_one() {
        let request = ContinuationRequest::builder()
            .context(DocumentContext::empty())
            .instruction("go".to_string())
            .kind(ContinuationKind::PageAppend)
            .max_attempts(Some(0))
            .build()
            .unwrap();
        assert_eq!(request.attempt_budget(), 1);
    }
}
