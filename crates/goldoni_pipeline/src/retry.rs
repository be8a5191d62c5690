//! Retry controller.
//!
//! Drives one continuation request through a bounded number of attempts,
//! feeding the failure reason from attempt N into attempt N+1's correction
//! note. Attempts are strictly sequential; an immutable [`AttemptState`] is
//! passed forward instead of threading a shared mutable last-error variable
//! through the loop.

use crate::envelope::{self, AcceptedAttempt};
use crate::{adapter, grammar, prompt, sanitize, FirstLineConstraint, PipelineConfig};
use crate::bounds::check_bounds;
use crate::window::context_window;
use goldoni_core::{ContinuationRequest, ContinuationResult, TaggedLine};
use goldoni_error::{GoldoniResult, PipelineError, PipelineErrorKind};
use goldoni_interface::GoldoniDriver;

/// The state carried into one attempt. Immutable; a failed attempt produces
/// the next state rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttemptState {
    /// 1-based attempt number
    number: u32,
    /// Why the previous attempt failed, empty on attempt 1
    correction: Option<String>,
}

impl AttemptState {
    fn first() -> Self {
        Self {
            number: 1,
            correction: None,
        }
    }

    fn next(&self, reason: String) -> Self {
        Self {
            number: self.number + 1,
            correction: Some(reason),
        }
    }
}

enum AttemptOutcome {
    Accepted(Box<AcceptedAttempt>),
    Failed(PipelineErrorKind),
}

/// Run the full retry loop for one request.
///
/// The caller sees either a validated result or a single terminal
/// `ExhaustedRetries` naming the last failure reason; per-attempt failures
/// never leak as errors.
#[tracing::instrument(
    skip(driver, config, request),
    fields(
        kind = %request.kind(),
        budget = request.attempt_budget(),
        context_lines = request.context().len(),
    )
)]
pub(crate) async fn run<D: GoldoniDriver>(
    driver: &D,
    config: &PipelineConfig,
    request: &ContinuationRequest,
) -> GoldoniResult<ContinuationResult> {
    let budget = request.attempt_budget();
    let contract = request.kind().contract();

    let mut state = AttemptState::first();
    loop {
        let is_final = state.number >= budget;
        tracing::debug!(
            attempt = state.number,
            is_final,
            correction = ?state.correction,
            "Starting attempt"
        );

        match run_attempt(driver, config, request, &state, is_final).await {
            AttemptOutcome::Accepted(accepted) => {
                return Ok(envelope::build(*accepted, contract));
            }
            AttemptOutcome::Failed(kind) => {
                tracing::warn!(
                    attempt = state.number,
                    reason = %kind,
                    "Attempt failed validation"
                );
                if is_final {
                    return Err(PipelineError::new(PipelineErrorKind::ExhaustedRetries {
                        attempts: budget,
                        last_reason: kind.to_string(),
                    })
                    .into());
                }
                state = state.next(kind.to_string());
            }
        }
    }
}

async fn run_attempt<D: GoldoniDriver>(
    driver: &D,
    config: &PipelineConfig,
    request: &ContinuationRequest,
    state: &AttemptState,
    is_final: bool,
) -> AttemptOutcome {
    let contract = request.kind().contract();

    let window: &[TaggedLine] = if *contract.attach_context() {
        context_window(request.context(), *config.context_window_lines())
    } else {
        &[]
    };
    let constraint = FirstLineConstraint::for_last_tag(window.last().map(|line| *line.tag()));

    let messages = prompt::assemble(request, constraint, state.correction.as_deref(), window);

    let raw = match adapter::invoke(driver, messages, config).await {
        Ok(raw) => raw,
        Err(kind) => return AttemptOutcome::Failed(kind),
    };

    let outcome = sanitize::sanitize(&raw.payload);
    if outcome.lines.is_empty() {
        return AttemptOutcome::Failed(PipelineErrorKind::PayloadParse(
            "no usable lines survived sanitization".to_string(),
        ));
    }

    // The first-line rule reflects narrative continuity; it is retried or
    // terminal, never repaired.
    if *contract.first_line_rule_enabled() {
        if let Err(reason) = constraint.check(*outcome.lines[0].tag()) {
            return AttemptOutcome::Failed(PipelineErrorKind::FirstLineConstraint(reason));
        }
    }

    let grammar_errors = grammar::validate_grammar(window, &outcome.lines);
    let grammar_valid = grammar_errors.is_empty();

    let (lines, grammar_repaired) = if grammar_valid {
        (outcome.lines.clone(), false)
    } else if is_final {
        tracing::info!(
            violations = grammar_errors.len(),
            "Final attempt: repairing grammar instead of failing"
        );
        let (repaired, changed) = grammar::repair_grammar(window, &outcome.lines);
        (repaired, changed)
    } else {
        return AttemptOutcome::Failed(PipelineErrorKind::Grammar(grammar_errors.join("; ")));
    };

    // Bounds are judged on what the model wrote; lines added by repair are
    // surfaced through the envelope's contract audit instead.
    if let Err(reason) = check_bounds(&outcome.lines, contract) {
        return AttemptOutcome::Failed(PipelineErrorKind::Bounds(reason));
    }

    AttemptOutcome::Accepted(Box::new(AcceptedAttempt {
        lines,
        assistant_message: raw.assistant_message,
        sanitize: outcome,
        grammar_valid,
        grammar_repaired,
        errors: grammar_errors,
    }))
}
