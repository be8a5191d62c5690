//! Validation reports and the continuation result envelope.

use crate::TaggedLine;
use serde::{Deserialize, Serialize};

/// Audit record attached to every accepted continuation.
///
/// `contract_valid`/`contract_errors` come from the envelope builder's final
/// read-only check against the kind's declared contract; they can disagree
/// with the pipeline's own acceptance (e.g. when grammar repair pushed the
/// line count past the maximum) so callers can detect drift.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of lines in the accepted continuation
    pub line_count: usize,
    /// Page count (`chapter-break` occurrences + 1), for page-bounded kinds
    pub page_count: Option<usize>,
    /// Whether the speaker/dialog grammar held without repair
    pub grammar_valid: bool,
    /// Whether last-attempt repair inserted synthetic speaker lines
    pub grammar_repaired: bool,
    /// Lines whose tag was coerced by the sanitizer
    pub coerced_lines: usize,
    /// Fragments the sanitizer dropped as unusable
    pub dropped_lines: usize,
    /// Whether the result satisfies the kind's declared contract
    pub contract_valid: bool,
    /// Specific contract check failures, empty when `contract_valid`
    pub contract_errors: Vec<String>,
    /// Validation error strings collected along the way
    pub errors: Vec<String>,
}

/// The unit handed to the caller on success.
///
/// Merging `lines` into the persisted document is the caller's
/// responsibility and happens strictly after the pipeline returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ContinuationResult {
    /// The validated continuation, in document order
    lines: Vec<TaggedLine>,
    /// The same lines serialized back to tagged text, one per line
    script_text: String,
    /// Short caller-facing message (the model's own, or a synthesized default)
    assistant_message: String,
    /// Contract-validation report
    report: ValidationReport,
}

impl ContinuationResult {
    /// Assemble a result from its parts.
    pub fn new(
        lines: Vec<TaggedLine>,
        assistant_message: impl Into<String>,
        report: ValidationReport,
    ) -> Self {
        let script_text = lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            lines,
            script_text,
            assistant_message: assistant_message.into(),
            report,
        }
    }
}
