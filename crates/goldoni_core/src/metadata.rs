//! Script metadata passed through to the prompt.

use serde::{Deserialize, Serialize};

/// Title and description of the script under edit.
///
/// Included in the outbound prompt so the backend keeps continuity with the
/// work's premise; never interpreted by the pipeline itself.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ScriptMetadata {
    /// Title of the script, if known
    title: Option<String>,
    /// One-line description or logline, if known
    description: Option<String>,
}

impl ScriptMetadata {
    /// Create metadata with a title and description.
    pub fn new(
        title: impl Into<Option<String>>,
        description: impl Into<Option<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
