//! The tag transition table and first-line constraint analyzer.
//!
//! A fixed lookup from the last tag of the existing document to the set of
//! tags that may legally open a continuation. The constraint is stated to the
//! model as a hard instruction and mechanically re-checked after generation;
//! the model is never trusted on this point.

use goldoni_core::Tag;

/// The first-line rule for one transition-table entry.
///
/// When `must_start_with` is empty there is no positive requirement and only
/// `must_not_start_with` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstLineConstraint {
    must_start_with: &'static [Tag],
    must_not_start_with: &'static [Tag],
}

// One entry per possible last tag, plus the empty-document sentinel. Pure
// data; never changes at runtime.
const AFTER_NONE: FirstLineConstraint = FirstLineConstraint {
    // A fresh document cannot open mid-dialogue or on a bare break.
    must_start_with: &[Tag::Header, Tag::Action, Tag::Speaker],
    must_not_start_with: &[Tag::Dialog, Tag::Directions, Tag::ChapterBreak],
};

const AFTER_HEADER: FirstLineConstraint = FirstLineConstraint {
    must_start_with: &[Tag::Action, Tag::Speaker],
    must_not_start_with: &[Tag::Header, Tag::Dialog, Tag::Directions, Tag::ChapterBreak],
};

const AFTER_ACTION: FirstLineConstraint = FirstLineConstraint {
    must_start_with: &[],
    must_not_start_with: &[Tag::Dialog, Tag::Directions],
};

const AFTER_SPEAKER: FirstLineConstraint = FirstLineConstraint {
    // Directly, or via one directions line; the grammar validator enforces
    // that a directions opening is immediately followed by dialog.
    must_start_with: &[Tag::Dialog, Tag::Directions],
    must_not_start_with: &[Tag::Speaker, Tag::Header, Tag::Action, Tag::ChapterBreak],
};

const AFTER_DIALOG: FirstLineConstraint = FirstLineConstraint {
    must_start_with: &[],
    must_not_start_with: &[Tag::Dialog],
};

const AFTER_DIRECTIONS: FirstLineConstraint = FirstLineConstraint {
    must_start_with: &[Tag::Dialog],
    must_not_start_with: &[Tag::Speaker, Tag::Header, Tag::Action, Tag::Directions, Tag::ChapterBreak],
};

const AFTER_CHAPTER_BREAK: FirstLineConstraint = FirstLineConstraint {
    must_start_with: &[Tag::Header],
    must_not_start_with: &[Tag::Action, Tag::Speaker, Tag::Dialog, Tag::Directions, Tag::ChapterBreak],
};

impl FirstLineConstraint {
    /// Look up the constraint for the last tag of the context window (`None`
    /// for an empty document).
    ///
    /// # Examples
    ///
    /// ```
    /// use goldoni_core::Tag;
    /// use goldoni_pipeline::FirstLineConstraint;
    ///
    /// let rule = FirstLineConstraint::for_last_tag(Some(Tag::Speaker));
    /// assert!(rule.check(Tag::Dialog).is_ok());
    /// assert!(rule.check(Tag::Action).is_err());
    /// ```
    pub fn for_last_tag(last_tag: Option<Tag>) -> &'static Self {
        match last_tag {
            None => &AFTER_NONE,
            Some(Tag::Header) => &AFTER_HEADER,
            Some(Tag::Action) => &AFTER_ACTION,
            Some(Tag::Speaker) => &AFTER_SPEAKER,
            Some(Tag::Dialog) => &AFTER_DIALOG,
            Some(Tag::Directions) => &AFTER_DIRECTIONS,
            Some(Tag::ChapterBreak) => &AFTER_CHAPTER_BREAK,
        }
    }

    /// Tags that may open the continuation (empty means no positive rule).
    pub fn must_start_with(&self) -> &'static [Tag] {
        self.must_start_with
    }

    /// Tags that may not open the continuation.
    pub fn must_not_start_with(&self) -> &'static [Tag] {
        self.must_not_start_with
    }

    /// Check a continuation's opening tag against this rule.
    ///
    /// # Errors
    ///
    /// Returns the specific violation as a human-readable reason string,
    /// suitable for the next attempt's correction note.
    pub fn check(&self, first: Tag) -> Result<(), String> {
        if self.must_not_start_with.contains(&first) {
            return Err(format!(
                "continuation must not start with <{}>; {}",
                first,
                self.requirement_text()
            ));
        }
        if !self.must_start_with.is_empty() && !self.must_start_with.contains(&first) {
            return Err(format!(
                "continuation starts with <{}> but {}",
                first,
                self.requirement_text()
            ));
        }
        Ok(())
    }

    /// The rule as natural language, embedded in the prompt as a hard
    /// instruction.
    pub fn requirement_text(&self) -> String {
        if self.must_start_with.is_empty() {
            format!(
                "it must not start with {}",
                join_tags(self.must_not_start_with)
            )
        } else {
            format!("it must start with {}", join_tags(self.must_start_with))
        }
    }
}

fn join_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("<{}>", tag))
        .collect::<Vec<_>>()
        .join(" or ")
}
