//! Context window builder.
//!
//! Extracts a bounded tail of the existing document to send to the backend.
//! Truncation must never sever a speaker from its dialog: that would make the
//! grammar validator see an artificial violation that does not exist in the
//! full document.

use goldoni_core::{DocumentContext, Tag};
use goldoni_core::TaggedLine;

/// The last `max_lines` lines of `context`, extended backwards past the
/// truncation point when it would open on a `dialog` or `directions` line
/// whose `speaker` is still available.
///
/// Pure function; a context shorter than `max_lines` is returned unchanged.
///
/// # Examples
///
/// ```
/// use goldoni_core::{DocumentContext, Tag, TaggedLine};
/// use goldoni_pipeline::context_window;
///
/// let ctx = DocumentContext::from(vec![
///     TaggedLine::new(Tag::Speaker, "ADA"),
///     TaggedLine::new(Tag::Dialog, "Run it again."),
/// ]);
/// // A one-line window would start on the dialog; the speaker is pulled in.
/// let window = context_window(&ctx, 1);
/// assert_eq!(window.len(), 2);
/// assert_eq!(*window[0].tag(), Tag::Speaker);
/// ```
pub fn context_window(context: &DocumentContext, max_lines: usize) -> &[TaggedLine] {
    let lines = context.lines();
    if max_lines == 0 {
        return &[];
    }
    let mut start = lines.len().saturating_sub(max_lines);

    // Walk back over a dialog/directions opening until the owning speaker is
    // inside the window, crossing any run of consecutive directions lines on
    // the way.
    while start > 0 {
        if !matches!(lines[start].tag(), Tag::Dialog | Tag::Directions) {
            break;
        }
        match lines[start - 1].tag() {
            Tag::Speaker | Tag::Directions => start -= 1,
            _ => break,
        }
    }

    &lines[start..]
}
