//! Sanitizer.
//!
//! Converts the raw payload from one backend invocation into a canonical
//! ordered list of tagged lines, coercing or dropping malformed fragments.
//! Deterministic and idempotent: sanitizing already-sanitized output returns
//! it unchanged.

use crate::adapter::{RawEntry, RawPayload};
use goldoni_core::{Tag, TaggedLine};
use regex::Regex;
use std::sync::OnceLock;

/// The sanitizer's canonical output plus its observability counters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizeOutcome {
    /// Canonical ordered tagged lines
    pub lines: Vec<TaggedLine>,
    /// Fragments whose tag had to be coerced into the vocabulary
    pub coerced: usize,
    /// Fragments dropped as unusable
    pub dropped: usize,
}

/// Sanitize whatever the adapter extracted.
pub(crate) fn sanitize(payload: &RawPayload) -> SanitizeOutcome {
    match payload {
        RawPayload::Structured(entries) => sanitize_structured(entries),
        RawPayload::Text(text) => sanitize_text(text),
    }
}

/// Sanitize structured `{tag, text}` entries.
///
/// Tags are case-normalized and alias-coerced; entries whose tag is outside
/// the vocabulary and cannot be coerced are dropped, as are entries with
/// empty text (except `chapter-break`, which never carries text).
pub fn sanitize_structured(entries: &[RawEntry]) -> SanitizeOutcome {
    let fragments = entries
        .iter()
        .map(|entry| (entry.tag.clone(), entry.text.clone()))
        .collect();
    normalize(fragments, UnknownTagPolicy::Drop)
}

/// Sanitize raw tagged text.
///
/// Scans for well-formed `<tag>content</tag>` pairs and self-closing
/// `<chapter-break/>` markers. A tag outside the vocabulary but with
/// non-empty content is coerced to `action` rather than dropped, preserving
/// authored content while keeping the document mechanically valid. If the
/// text contains no recognizable tags at all, every non-blank source line
/// becomes an `action` line, so non-empty input always yields something
/// structurally valid.
pub fn sanitize_text(raw: &str) -> SanitizeOutcome {
    let fragments = scan_tagged_fragments(raw);

    if fragments.is_empty() {
        let lines: Vec<TaggedLine> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| TaggedLine::new(Tag::Action, line))
            .collect();
        let coerced = lines.len();
        return SanitizeOutcome {
            lines,
            coerced,
            dropped: 0,
        };
    }

    normalize(fragments, UnknownTagPolicy::CoerceToAction)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnknownTagPolicy {
    Drop,
    CoerceToAction,
}

fn normalize(fragments: Vec<(String, String)>, policy: UnknownTagPolicy) -> SanitizeOutcome {
    let mut outcome = SanitizeOutcome::default();

    for (raw_tag, raw_text) in fragments {
        let text = raw_text.trim();
        let normalized = raw_tag.trim().to_ascii_lowercase();

        match Tag::coerce(&normalized) {
            Some(Tag::ChapterBreak) => {
                if normalized != format!("{}", Tag::ChapterBreak) {
                    outcome.coerced += 1;
                }
                push_deduped(&mut outcome, TaggedLine::chapter_break());
            }
            Some(tag) => {
                if text.is_empty() {
                    outcome.dropped += 1;
                    continue;
                }
                if normalized != format!("{tag}") {
                    outcome.coerced += 1;
                }
                push_deduped(&mut outcome, TaggedLine::new(tag, text));
            }
            None => match policy {
                UnknownTagPolicy::CoerceToAction if !text.is_empty() => {
                    outcome.coerced += 1;
                    push_deduped(&mut outcome, TaggedLine::new(Tag::Action, text));
                }
                _ => outcome.dropped += 1,
            },
        }
    }

    outcome
}

// Adjacent chapter breaks collapse to one; an accepted result never contains
// two consecutive breaks.
fn push_deduped(outcome: &mut SanitizeOutcome, line: TaggedLine) {
    if *line.tag() == Tag::ChapterBreak
        && outcome.lines.last().map(TaggedLine::tag) == Some(&Tag::ChapterBreak)
    {
        outcome.dropped += 1;
        return;
    }
    outcome.lines.push(line);
}

fn tag_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9_-]*)\s*(/)?>").expect("tag token regex is valid")
    })
}

/// Scan text for `<tag>content</tag>` pairs and self-closing `<tag/>`
/// markers, in document order. Openings with no matching close are skipped.
fn scan_tagged_fragments(raw: &str) -> Vec<(String, String)> {
    let re = tag_token_regex();
    let mut fragments = Vec::new();
    let mut pos = 0;

    while pos < raw.len() {
        let Some(caps) = re.captures(&raw[pos..]) else {
            break;
        };
        let full = caps.get(0).expect("capture group 0 always present");
        let name = caps.get(1).expect("tag name group").as_str().to_string();
        let self_closing = caps.get(2).is_some();
        let token_end = pos + full.end();

        if self_closing {
            fragments.push((name, String::new()));
            pos = token_end;
            continue;
        }

        let closing = format!("</{name}>");
        match raw[token_end..].find(&closing) {
            Some(rel) => {
                let content = &raw[token_end..token_end + rel];
                fragments.push((name, content.to_string()));
                pos = token_end + rel + closing.len();
            }
            None => {
                // Unterminated opening; skip the token and keep scanning.
                pos = token_end;
            }
        }
    }

    fragments
}
