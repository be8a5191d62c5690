//! Bounds validator.
//!
//! Enforces the per-kind line count contract and, for page-bounded kinds,
//! the page count derived from chapter breaks. Violations produce specific
//! human-readable reasons consumed by the retry controller as the next
//! attempt's correction note.

use goldoni_core::{Contract, Tag, TaggedLine};

/// Pages are chapter-break occurrences plus one.
pub fn page_count(lines: &[TaggedLine]) -> usize {
    lines
        .iter()
        .filter(|line| *line.tag() == Tag::ChapterBreak)
        .count()
        + 1
}

/// Check the continuation against the contract's line and page bounds.
///
/// # Errors
///
/// Returns every violated bound as one reason string, e.g.
/// `"line count 9 below minimum 12"`.
pub fn check_bounds(lines: &[TaggedLine], contract: &Contract) -> Result<(), String> {
    let mut reasons = Vec::new();
    let count = lines.len();

    if count < *contract.min_lines() {
        reasons.push(format!(
            "line count {count} below minimum {}",
            contract.min_lines()
        ));
    }
    if count > *contract.max_lines() {
        reasons.push(format!(
            "line count {count} above maximum {}",
            contract.max_lines()
        ));
    }

    if contract.min_pages().is_some() || contract.max_pages().is_some() {
        let pages = page_count(lines);
        if let Some(min) = contract.min_pages() {
            if pages < *min {
                reasons.push(format!("page count {pages} below minimum {min}"));
            }
        }
        if let Some(max) = contract.max_pages() {
            if pages > *max {
                reasons.push(format!("page count {pages} above maximum {max}"));
            }
        }
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(reasons.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldoni_core::ContinuationKind;

    fn action_lines(n: usize) -> Vec<TaggedLine> {
        (0..n)
            .map(|i| TaggedLine::new(Tag::Action, format!("Beat {i}.")))
            .collect()
    }

    #[test]
    fn test_within_bounds_passes() {
        let contract = ContinuationKind::ShortContinuation.contract();
        assert!(check_bounds(&action_lines(5), contract).is_ok());
    }

    #[test]
    fn test_below_minimum_names_both_numbers() {
        let contract = ContinuationKind::PageAppend.contract();
        let reason = check_bounds(&action_lines(9), contract).unwrap_err();
        assert!(reason.contains('9'));
        assert!(reason.contains("12"));
    }

    #[test]
    fn test_above_maximum() {
        let contract = ContinuationKind::ShortContinuation.contract();
        let reason = check_bounds(&action_lines(17), contract).unwrap_err();
        assert!(reason.contains("above maximum 16"));
    }

    #[test]
    fn test_page_count_is_breaks_plus_one() {
        let mut lines = action_lines(10);
        lines.insert(5, TaggedLine::chapter_break());
        assert_eq!(page_count(&lines), 2);
        assert_eq!(page_count(&action_lines(3)), 1);
    }

    #[test]
    fn test_full_generation_checks_pages() {
        let contract = ContinuationKind::FullGeneration.contract();
        // 44 lines but only 1 page.
        let reason = check_bounds(&action_lines(44), contract).unwrap_err();
        assert!(reason.contains("page count 1 below minimum 5"));
    }

    #[test]
    fn test_full_generation_passing_shape() {
        let contract = ContinuationKind::FullGeneration.contract();
        let mut lines = Vec::new();
        for page in 0..5 {
            if page > 0 {
                lines.push(TaggedLine::chapter_break());
            }
            lines.push(TaggedLine::new(Tag::Header, "INT. LAB - NIGHT"));
            lines.extend(action_lines(9));
        }
        assert!(check_bounds(&lines, contract).is_ok());
    }
}
