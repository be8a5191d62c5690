//! The screenplay tag vocabulary.

use serde::{Deserialize, Serialize};

/// The six permitted screenplay line tags.
///
/// This is a closed set; no other value is ever valid in an accepted
/// continuation. Serialized in kebab-case (`chapter-break`).
///
/// # Examples
///
/// ```
/// use goldoni_core::Tag;
///
/// assert_eq!(format!("{}", Tag::ChapterBreak), "chapter-break");
/// assert_eq!("dialog".parse::<Tag>().unwrap(), Tag::Dialog);
/// ```
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Tag {
    /// Scene heading (INT./EXT. slug line)
    Header,
    /// Action/description line
    Action,
    /// Character name introducing dialog
    Speaker,
    /// Spoken line
    Dialog,
    /// Stage/camera directions (parenthetical)
    Directions,
    /// Page/chapter boundary; carries no text
    ChapterBreak,
}

impl Tag {
    /// Coerce a raw tag name to a vocabulary tag, normalizing case and
    /// common aliases models invent (`"scene"`, `"dialogue"`, `"character"`).
    ///
    /// Returns `None` when the name is neither a vocabulary tag nor a known
    /// alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use goldoni_core::Tag;
    ///
    /// assert_eq!(Tag::coerce("Dialogue"), Some(Tag::Dialog));
    /// assert_eq!(Tag::coerce("scene-heading"), Some(Tag::Header));
    /// assert_eq!(Tag::coerce("stanza"), None);
    /// ```
    pub fn coerce(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if let Ok(tag) = normalized.parse::<Self>() {
            return Some(tag);
        }
        match normalized.as_str() {
            "scene" | "scene-heading" | "scene_heading" | "heading" | "slug" | "slugline" => {
                Some(Self::Header)
            }
            "description" | "narration" | "narrative" => Some(Self::Action),
            "character" | "name" | "char" => Some(Self::Speaker),
            "dialogue" | "line" | "speech" => Some(Self::Dialog),
            "parenthetical" | "direction" | "stage-directions" | "stage_directions" => {
                Some(Self::Directions)
            }
            "page-break" | "page_break" | "break" | "chapter_break" => Some(Self::ChapterBreak),
            _ => None,
        }
    }

    /// Whether lines with this tag carry text. `chapter-break` is the only
    /// tag without content.
    pub fn carries_text(&self) -> bool {
        !matches!(self, Self::ChapterBreak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_vocabulary_is_exactly_six_tags() {
        assert_eq!(Tag::iter().count(), 6);
    }

    #[test]
    fn test_kebab_case_round_trip() {
        for tag in Tag::iter() {
            let name = format!("{}", tag);
            assert_eq!(name.parse::<Tag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Tag::ChapterBreak).unwrap();
        assert_eq!(json, "\"chapter-break\"");
        let back: Tag = serde_json::from_str("\"chapter-break\"").unwrap();
        assert_eq!(back, Tag::ChapterBreak);
    }

    #[test]
    fn test_coerce_aliases() {
        assert_eq!(Tag::coerce("DIALOGUE"), Some(Tag::Dialog));
        assert_eq!(Tag::coerce("Scene"), Some(Tag::Header));
        assert_eq!(Tag::coerce("character"), Some(Tag::Speaker));
        assert_eq!(Tag::coerce("parenthetical"), Some(Tag::Directions));
        assert_eq!(Tag::coerce("page-break"), Some(Tag::ChapterBreak));
        assert_eq!(Tag::coerce("  action  "), Some(Tag::Action));
    }

    #[test]
    fn test_coerce_rejects_unknown() {
        assert_eq!(Tag::coerce("stanza"), None);
        assert_eq!(Tag::coerce(""), None);
    }
}
