//! Continuation kinds and their output contracts.

use serde::{Deserialize, Serialize};

/// The kind of continuation requested.
///
/// A kind never changes the pipeline's algorithm, only its numeric
/// configuration: each kind maps to one [`Contract`] in a static table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContinuationKind {
    /// A short in-place continuation of a few lines
    ShortContinuation,
    /// Roughly one page of new material appended to the script
    PageAppend,
    /// A full multi-page script generated from an instruction
    FullGeneration,
}

/// The declared output contract for one continuation kind.
///
/// One unified configuration struct parameterizes the whole pipeline; the
/// three kinds differ only in these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Contract {
    /// Minimum accepted line count (inclusive)
    min_lines: usize,
    /// Maximum accepted line count (inclusive)
    max_lines: usize,
    /// Minimum page count (`chapter-break` occurrences + 1), if bounded
    min_pages: Option<usize>,
    /// Maximum page count, if bounded
    max_pages: Option<usize>,
    /// Default attempt budget for this kind
    max_attempts: u32,
    /// Whether the existing document's tail is sent to the backend
    attach_context: bool,
    /// Whether the transition-table first-line rule is enforced
    first_line_rule_enabled: bool,
}

const SHORT_CONTINUATION: Contract = Contract {
    min_lines: 2,
    max_lines: 16,
    min_pages: None,
    max_pages: None,
    max_attempts: 3,
    attach_context: true,
    first_line_rule_enabled: true,
};

const PAGE_APPEND: Contract = Contract {
    min_lines: 12,
    max_lines: 26,
    min_pages: None,
    max_pages: None,
    max_attempts: 3,
    attach_context: true,
    first_line_rule_enabled: true,
};

const FULL_GENERATION: Contract = Contract {
    min_lines: 40,
    max_lines: 132,
    min_pages: Some(5),
    max_pages: Some(6),
    max_attempts: 4,
    attach_context: false,
    first_line_rule_enabled: true,
};

impl ContinuationKind {
    /// The static contract for this kind. Pure data; never changes at
    /// runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use goldoni_core::ContinuationKind;
    ///
    /// let contract = ContinuationKind::PageAppend.contract();
    /// assert_eq!(*contract.min_lines(), 12);
    /// assert_eq!(*contract.max_lines(), 26);
    /// ```
    pub fn contract(&self) -> &'static Contract {
        match self {
            Self::ShortContinuation => &SHORT_CONTINUATION,
            Self::PageAppend => &PAGE_APPEND,
            Self::FullGeneration => &FULL_GENERATION,
        }
    }
}
