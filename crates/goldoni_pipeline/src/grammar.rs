//! Grammar validator and last-resort repairer.
//!
//! One rule, checked over the context tail concatenated with the new lines:
//! a `speaker` must be followed by `dialog`, optionally with exactly one
//! `directions` line between them, and conversely every `dialog` must be
//! preceded by a qualifying `speaker`. Violations are collected as positional
//! error strings so retry feedback can be specific.
//!
//! Repair runs only on the final permitted attempt; earlier failures
//! re-prompt the model instead of silently rewriting its output.

use goldoni_core::{Tag, TaggedLine};

/// Fallback name when a dialog line needs a speaker and none has appeared
/// anywhere in the sequence.
const PLACEHOLDER_SPEAKER: &str = "CHARACTER";

/// Validate the speaker/dialog adjacency rule.
///
/// `tail` is the trailing slice of existing context (already valid in the
/// full document); `lines` is the candidate continuation. Errors are reported
/// only for positions inside `lines`, numbered from 1 — including the case
/// where the tail ends on a `speaker` (or `speaker` plus one `directions`)
/// and the continuation fails to deliver its `dialog`.
pub fn validate_grammar(tail: &[TaggedLine], lines: &[TaggedLine]) -> Vec<String> {
    let combined: Vec<&TaggedLine> = tail.iter().chain(lines.iter()).collect();
    let mut errors = Vec::new();

    for (i, line) in combined.iter().enumerate() {
        // Only report on the new lines; the tail is not this attempt's
        // fault. Exception: a speaker at the end of the tail hands its
        // dialog obligation to this continuation, since the follower slot
        // falls inside `lines`.
        let new_index = match i.checked_sub(tail.len()) {
            Some(idx) => idx + 1,
            None => {
                if *line.tag() == Tag::Speaker
                    && follower_slot(&combined, i) >= tail.len()
                    && !introduces_dialog(&combined, i)
                {
                    let position = follower_slot(&combined, i) - tail.len() + 1;
                    errors.push(format!(
                        "line {position}: context ends with <speaker> but its \
                         <dialog> is missing (one <directions> line between \
                         them is allowed)"
                    ));
                }
                continue;
            }
        };

        match line.tag() {
            Tag::Dialog => {
                if !has_qualifying_speaker(&combined, i) {
                    errors.push(format!(
                        "line {new_index}: <dialog> has no preceding <speaker> \
                         (one <directions> line between them is allowed)"
                    ));
                }
            }
            Tag::Speaker => {
                // A trailing speaker is a legal continuation point; the
                // transition table forces the next continuation to open with
                // its dialog.
                if i + 1 == combined.len() {
                    continue;
                }
                if !introduces_dialog(&combined, i) {
                    errors.push(format!(
                        "line {new_index}: <speaker> is not followed by <dialog> \
                         (one <directions> line between them is allowed)"
                    ));
                }
            }
            _ => {}
        }
    }

    errors
}

fn has_qualifying_speaker(combined: &[&TaggedLine], dialog_index: usize) -> bool {
    let mut j = dialog_index;
    // Allow exactly one intervening directions line.
    if j > 0 && *combined[j - 1].tag() == Tag::Directions {
        j -= 1;
    }
    j > 0 && *combined[j - 1].tag() == Tag::Speaker
}

fn introduces_dialog(combined: &[&TaggedLine], speaker_index: usize) -> bool {
    let k = follower_slot(combined, speaker_index);
    k < combined.len() && *combined[k].tag() == Tag::Dialog
}

// Where a speaker's dialog must sit: the next position, or the one after
// when a single directions line intervenes.
fn follower_slot(combined: &[&TaggedLine], speaker_index: usize) -> usize {
    let mut k = speaker_index + 1;
    if k < combined.len() && *combined[k].tag() == Tag::Directions {
        k += 1;
    }
    k
}

/// Repair the continuation by synthesizing speaker lines.
///
/// Walks the sequence tracking the most recently seen speaker name; whenever
/// a dialog line lacks a qualifying preceding speaker, one is inserted
/// immediately before it (before its directions line, when the dialog is
/// reached through one). Idempotent: repairing repaired output is a no-op.
///
/// Returns the repaired lines and whether anything was inserted.
pub fn repair_grammar(tail: &[TaggedLine], lines: &[TaggedLine]) -> (Vec<TaggedLine>, bool) {
    let mut last_speaker: Option<String> = tail
        .iter()
        .rev()
        .find(|line| *line.tag() == Tag::Speaker)
        .map(|line| line.text().clone());

    let mut repaired: Vec<TaggedLine> = Vec::with_capacity(lines.len());
    let mut changed = false;

    for line in lines {
        if *line.tag() == Tag::Speaker {
            last_speaker = Some(line.text().clone());
        }

        if *line.tag() == Tag::Dialog {
            let combined: Vec<&TaggedLine> = tail.iter().chain(repaired.iter()).collect();
            if !preceded_by_speaker(&combined) {
                let name = last_speaker
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_SPEAKER.to_string());
                let insert_at = insertion_point(&repaired);
                repaired.insert(insert_at, TaggedLine::new(Tag::Speaker, name));
                changed = true;
            }
        }

        repaired.push(line.clone());
    }

    (repaired, changed)
}

// Whether the next line to be appended would see a qualifying speaker behind
// it.
fn preceded_by_speaker(combined: &[&TaggedLine]) -> bool {
    let mut j = combined.len();
    if j > 0 && *combined[j - 1].tag() == Tag::Directions {
        j -= 1;
    }
    j > 0 && *combined[j - 1].tag() == Tag::Speaker
}

// Synthesized speakers go before the dialog's directions line when there is
// one, keeping speaker → directions → dialog order.
fn insertion_point(repaired: &[TaggedLine]) -> usize {
    if repaired.last().map(TaggedLine::tag) == Some(&Tag::Directions) {
        repaired.len() - 1
    } else {
        repaired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(tag: Tag, text: &str) -> TaggedLine {
        TaggedLine::new(tag, text)
    }

    #[test]
    fn test_valid_exchange_passes() {
        let lines = vec![
            line(Tag::Speaker, "ADA"),
            line(Tag::Dialog, "It halts."),
            line(Tag::Speaker, "BRUNO"),
            line(Tag::Directions, "incredulous"),
            line(Tag::Dialog, "On every input?"),
        ];
        assert!(validate_grammar(&[], &lines).is_empty());
    }

    #[test]
    fn test_dialog_without_speaker_is_positional_error() {
        let lines = vec![
            line(Tag::Action, "The terminal beeps."),
            line(Tag::Dialog, "Finally."),
        ];
        let errors = validate_grammar(&[], &lines);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("line 2:"));
    }

    #[test]
    fn test_tail_speaker_satisfies_first_dialog() {
        let tail = vec![line(Tag::Speaker, "ADA")];
        let lines = vec![line(Tag::Dialog, "Ready when you are.")];
        assert!(validate_grammar(&tail, &lines).is_empty());
    }

    #[test]
    fn test_tail_speaker_dialog_must_arrive_in_continuation() {
        let tail = vec![
            line(Tag::Action, "She stands."),
            line(Tag::Speaker, "ADA"),
        ];
        let lines = vec![
            line(Tag::Directions, "beat"),
            line(Tag::Action, "The lights go out."),
        ];
        let errors = validate_grammar(&tail, &lines);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("line 2:"));
        assert!(errors[0].contains("context ends with <speaker>"));
    }

    #[test]
    fn test_tail_speaker_with_tail_directions_needs_dialog_first() {
        let tail = vec![
            line(Tag::Speaker, "ADA"),
            line(Tag::Directions, "whispering"),
        ];
        let lines = vec![line(Tag::Action, "Nothing happens.")];
        let errors = validate_grammar(&tail, &lines);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("line 1:"));
    }

    #[test]
    fn test_tail_speaker_satisfied_through_directions_opening() {
        let tail = vec![line(Tag::Speaker, "ADA")];
        let lines = vec![
            line(Tag::Directions, "quietly"),
            line(Tag::Dialog, "Not here."),
        ];
        assert!(validate_grammar(&tail, &lines).is_empty());
    }

    #[test]
    fn test_tail_violations_are_not_reported() {
        // The tail itself is malformed, but this attempt did not produce it.
        let tail = vec![line(Tag::Dialog, "Orphaned.")];
        let lines = vec![line(Tag::Action, "Silence.")];
        assert!(validate_grammar(&tail, &lines).is_empty());
    }

    #[test]
    fn test_two_directions_between_speaker_and_dialog_fails() {
        let lines = vec![
            line(Tag::Speaker, "ADA"),
            line(Tag::Directions, "standing"),
            line(Tag::Directions, "slowly"),
            line(Tag::Dialog, "Enough."),
        ];
        let errors = validate_grammar(&[], &lines);
        // Both the unanswered speaker and the orphaned dialog are reported.
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_trailing_speaker_is_allowed() {
        let lines = vec![
            line(Tag::Action, "She turns to him."),
            line(Tag::Speaker, "ADA"),
        ];
        assert!(validate_grammar(&[], &lines).is_empty());
    }

    #[test]
    fn test_repair_inserts_placeholder_speaker() {
        let lines = vec![line(Tag::Dialog, "Hi")];
        let (repaired, changed) = repair_grammar(&[], &lines);
        assert!(changed);
        assert_eq!(
            repaired,
            vec![
                line(Tag::Speaker, PLACEHOLDER_SPEAKER),
                line(Tag::Dialog, "Hi"),
            ]
        );
    }

    #[test]
    fn test_repair_reuses_last_known_speaker() {
        let lines = vec![
            line(Tag::Speaker, "ADA"),
            line(Tag::Dialog, "First."),
            line(Tag::Action, "A pause."),
            line(Tag::Dialog, "Second."),
        ];
        let (repaired, changed) = repair_grammar(&[], &lines);
        assert!(changed);
        assert_eq!(repaired[3], line(Tag::Speaker, "ADA"));
        assert!(validate_grammar(&[], &repaired).is_empty());
    }

    #[test]
    fn test_repair_takes_speaker_name_from_tail() {
        let tail = vec![
            line(Tag::Speaker, "BRUNO"),
            line(Tag::Dialog, "Earlier line."),
        ];
        let lines = vec![line(Tag::Dialog, "Orphaned reply.")];
        let (repaired, _) = repair_grammar(&tail, &lines);
        assert_eq!(repaired[0], line(Tag::Speaker, "BRUNO"));
    }

    #[test]
    fn test_repair_inserts_before_directions() {
        let lines = vec![
            line(Tag::Directions, "whispering"),
            line(Tag::Dialog, "Not here."),
        ];
        let (repaired, _) = repair_grammar(&[], &lines);
        assert_eq!(*repaired[0].tag(), Tag::Speaker);
        assert_eq!(*repaired[1].tag(), Tag::Directions);
        assert_eq!(*repaired[2].tag(), Tag::Dialog);
        assert!(validate_grammar(&[], &repaired).is_empty());
    }

    #[test]
    fn test_repair_is_idempotent() {
        let lines = vec![
            line(Tag::Dialog, "One."),
            line(Tag::Dialog, "Two."),
        ];
        let (once, changed_once) = repair_grammar(&[], &lines);
        assert!(changed_once);
        let (twice, changed_twice) = repair_grammar(&[], &once);
        assert!(!changed_twice);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_repair_preserves_passing_input() {
        let lines = vec![
            line(Tag::Speaker, "ADA"),
            line(Tag::Dialog, "All good."),
        ];
        let (repaired, changed) = repair_grammar(&[], &lines);
        assert!(!changed);
        assert_eq!(repaired, lines);
    }
}
