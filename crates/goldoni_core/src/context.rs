//! Read-only document snapshots.

use crate::{Tag, TaggedLine};
use serde::{Deserialize, Serialize};

/// An ordered snapshot of the existing script, read-only input to the
/// pipeline.
///
/// The pipeline never mutates a context and never re-reads the document of
/// record mid-request; a `DocumentContext` is immutable for the duration of
/// one continuation.
///
/// # Examples
///
/// ```
/// use goldoni_core::{DocumentContext, Tag, TaggedLine};
///
/// let ctx = DocumentContext::from(vec![
///     TaggedLine::new(Tag::Header, "INT. LAB - NIGHT"),
///     TaggedLine::new(Tag::Speaker, "ADA"),
/// ]);
/// assert_eq!(ctx.last_tag(), Some(Tag::Speaker));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentContext {
    lines: Vec<TaggedLine>,
}

impl DocumentContext {
    /// Create an empty context (a fresh document).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The lines of the snapshot, in document order.
    pub fn lines(&self) -> &[TaggedLine] {
        &self.lines
    }

    /// The tag of the final line, or `None` for an empty document.
    pub fn last_tag(&self) -> Option<Tag> {
        self.lines.last().map(|line| *line.tag())
    }

    /// Number of lines in the snapshot.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<TaggedLine>> for DocumentContext {
    fn from(lines: Vec<TaggedLine>) -> Self {
        Self { lines }
    }
}

impl FromIterator<TaggedLine> for DocumentContext {
    fn from_iter<I: IntoIterator<Item = TaggedLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_tag_of_empty_context() {
        assert_eq!(DocumentContext::empty().last_tag(), None);
    }

    #[test]
    fn test_last_tag() {
        let ctx = DocumentContext::from(vec![
            TaggedLine::new(Tag::Action, "She types."),
            TaggedLine::chapter_break(),
        ]);
        assert_eq!(ctx.last_tag(), Some(Tag::ChapterBreak));
    }
}
