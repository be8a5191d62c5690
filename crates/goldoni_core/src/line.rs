//! Tagged screenplay lines.

use crate::Tag;
use serde::{Deserialize, Serialize};

/// One unit of screenplay markup: a (tag, text) pair.
///
/// `text` is non-empty for every tag except `chapter-break`, which carries no
/// content.
///
/// # Examples
///
/// ```
/// use goldoni_core::{Tag, TaggedLine};
///
/// let line = TaggedLine::new(Tag::Speaker, "ADA");
/// assert_eq!(format!("{}", line), "<speaker>ADA</speaker>");
///
/// let brk = TaggedLine::chapter_break();
/// assert_eq!(format!("{}", brk), "<chapter-break/>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct TaggedLine {
    /// The line's vocabulary tag
    tag: Tag,
    /// The line's content (empty only for `chapter-break`)
    text: String,
}

impl TaggedLine {
    /// Create a new tagged line.
    pub fn new(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    /// Create a chapter break line. Chapter breaks carry no text.
    pub fn chapter_break() -> Self {
        Self {
            tag: Tag::ChapterBreak,
            text: String::new(),
        }
    }
}

impl std::fmt::Display for TaggedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.tag == Tag::ChapterBreak {
            write!(f, "<{}/>", self.tag)
        } else {
            write!(f, "<{tag}>{text}</{tag}>", tag = self.tag, text = self.text)
        }
    }
}
