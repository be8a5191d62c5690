//! Response envelope builder.
//!
//! Packages the winning attempt into the caller-facing result and attaches
//! the contract-validation report. The contract check here is a read-only
//! audit performed even on success, so callers can detect output that passed
//! the pipeline's own checks but drifted outside the documented contract
//! (e.g. when grammar repair pushed the line count past the maximum).

use crate::bounds::{check_bounds, page_count};
use crate::sanitize::SanitizeOutcome;
use goldoni_core::{Contract, ContinuationResult, TaggedLine, ValidationReport};

/// Everything the envelope needs from the winning attempt.
#[derive(Debug, Clone)]
pub(crate) struct AcceptedAttempt {
    pub lines: Vec<TaggedLine>,
    pub assistant_message: Option<String>,
    pub sanitize: SanitizeOutcome,
    pub grammar_valid: bool,
    pub grammar_repaired: bool,
    pub errors: Vec<String>,
}

/// Build the final result for an accepted attempt.
pub(crate) fn build(attempt: AcceptedAttempt, contract: &Contract) -> ContinuationResult {
    let (contract_valid, contract_errors) = match check_bounds(&attempt.lines, contract) {
        Ok(()) => (true, Vec::new()),
        Err(reason) => (false, reason.split("; ").map(str::to_string).collect()),
    };

    let pages = (contract.min_pages().is_some() || contract.max_pages().is_some())
        .then(|| page_count(&attempt.lines));

    let report = ValidationReport {
        line_count: attempt.lines.len(),
        page_count: pages,
        grammar_valid: attempt.grammar_valid,
        grammar_repaired: attempt.grammar_repaired,
        coerced_lines: attempt.sanitize.coerced,
        dropped_lines: attempt.sanitize.dropped,
        contract_valid,
        contract_errors,
        errors: attempt.errors,
    };

    let message = match attempt.assistant_message {
        Some(message) if !message.trim().is_empty() => message,
        _ => format!("Added {} lines to your script.", report.line_count),
    };

    tracing::info!(
        line_count = report.line_count,
        page_count = ?report.page_count,
        grammar_repaired = report.grammar_repaired,
        contract_valid = report.contract_valid,
        "Continuation accepted"
    );

    ContinuationResult::new(attempt.lines, message, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldoni_core::{ContinuationKind, Tag};

    fn accepted(lines: Vec<TaggedLine>) -> AcceptedAttempt {
        AcceptedAttempt {
            lines,
            assistant_message: None,
            sanitize: SanitizeOutcome::default(),
            grammar_valid: true,
            grammar_repaired: false,
            errors: Vec::new(),
        }
    }

    fn action_lines(n: usize) -> Vec<TaggedLine> {
        (0..n)
            .map(|i| TaggedLine::new(Tag::Action, format!("Beat {i}.")))
            .collect()
    }

    #[test]
    fn test_default_message_counts_lines() {
        let contract = ContinuationKind::ShortContinuation.contract();
        let result = build(accepted(action_lines(4)), contract);
        assert_eq!(result.assistant_message(), "Added 4 lines to your script.");
    }

    #[test]
    fn test_model_message_wins_when_non_empty() {
        let contract = ContinuationKind::ShortContinuation.contract();
        let mut attempt = accepted(action_lines(4));
        attempt.assistant_message = Some("Ada pushes back here.".to_string());
        let result = build(attempt, contract);
        assert_eq!(result.assistant_message(), "Ada pushes back here.");
    }

    #[test]
    fn test_blank_model_message_falls_back() {
        let contract = ContinuationKind::ShortContinuation.contract();
        let mut attempt = accepted(action_lines(2));
        attempt.assistant_message = Some("   ".to_string());
        let result = build(attempt, contract);
        assert!(result.assistant_message().starts_with("Added 2 lines"));
    }

    #[test]
    fn test_audit_flags_post_repair_overflow() {
        let contract = ContinuationKind::ShortContinuation.contract();
        // 17 lines against a max of 16: accepted upstream, flagged here.
        let result = build(accepted(action_lines(17)), contract);
        assert!(!result.report().contract_valid);
        assert!(
            result.report().contract_errors[0].contains("above maximum 16"),
        );
    }

    #[test]
    fn test_page_count_reported_only_for_page_bounded_kinds() {
        let short = build(
            accepted(action_lines(4)),
            ContinuationKind::ShortContinuation.contract(),
        );
        assert!(short.report().page_count.is_none());

        let full = build(
            accepted(action_lines(44)),
            ContinuationKind::FullGeneration.contract(),
        );
        assert_eq!(full.report().page_count, Some(1));
    }
}
