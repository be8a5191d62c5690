//! Prompt assembler.
//!
//! Builds the outbound message content in a fixed order: task instruction,
//! first-line constraint, kind-specific continuity note, correction note from
//! the previous failed attempt, document metadata, and the truncated context
//! last, to exploit recency bias in the backend. Pure; no I/O.

use crate::FirstLineConstraint;
use goldoni_core::{ContinuationKind, ContinuationRequest, Message, Role, TaggedLine};
use strum::IntoEnumIterator;

/// Assemble the system and user messages for one attempt.
pub(crate) fn assemble(
    request: &ContinuationRequest,
    constraint: &FirstLineConstraint,
    correction: Option<&str>,
    window: &[TaggedLine],
) -> Vec<Message> {
    vec![
        Message::new(Role::System, system_text()),
        Message::new(Role::User, user_text(request, constraint, correction, window)),
    ]
}

fn system_text() -> String {
    let tags = goldoni_core::Tag::iter()
        .map(|tag| format!("<{}>", tag))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a screenwriting assistant. You write screenplay content as \
         tagged lines using exactly these tags: {tags}. Every line carries \
         text except <chapter-break>, which marks a page boundary and is \
         empty. Respond by calling the provided function with a `lines` \
         array of {{tag, text}} objects and a short `assistantResponse` for \
         the writer. Never invent tags outside the vocabulary."
    )
}

fn user_text(
    request: &ContinuationRequest,
    constraint: &FirstLineConstraint,
    correction: Option<&str>,
    window: &[TaggedLine],
) -> String {
    let contract = request.kind().contract();
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!("Task: {}", request.instruction()));
    sections.push(format!(
        "Write between {} and {} tagged lines.",
        contract.min_lines(),
        contract.max_lines()
    ));
    sections.push(format!(
        "First-line rule: {}.",
        constraint.requirement_text()
    ));

    if let Some(note) = continuity_note(*request.kind()) {
        sections.push(note);
    }

    if let Some(reason) = correction {
        sections.push(format!(
            "Your previous attempt was rejected: {reason}. Correct this in \
             your next response."
        ));
    }

    let metadata = request.metadata();
    if let Some(title) = metadata.title() {
        sections.push(format!("Script title: {title}"));
    }
    if let Some(description) = metadata.description() {
        sections.push(format!("Script description: {description}"));
    }

    // Context goes last so the model continues from what it just read.
    if !window.is_empty() {
        let tail = window
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!(
            "The script so far ends with these lines. Continue directly from \
             them:\n{tail}"
        ));
    }

    sections.join("\n\n")
}

fn continuity_note(kind: ContinuationKind) -> Option<String> {
    let contract = kind.contract();
    match kind {
        ContinuationKind::ShortContinuation => Some(
            "Continue the current scene in place. Do not open a new scene \
             or add a chapter break unless the task asks for one."
                .to_string(),
        ),
        ContinuationKind::PageAppend => Some(
            "Append roughly one page of new material and end on a natural \
             beat, not mid-exchange."
                .to_string(),
        ),
        ContinuationKind::FullGeneration => {
            let min = (*contract.min_pages())?;
            let max = (*contract.max_pages())?;
            Some(format!(
                "Write a complete script of {min} to {max} pages, separating \
                 pages with <chapter-break> lines. Open each page after a \
                 break with a <header> line."
            ))
        }
    }
}
