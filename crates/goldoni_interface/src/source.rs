//! Document source trait.

use async_trait::async_trait;
use goldoni_core::{DocumentContext, ScriptMetadata};
use goldoni_error::GoldoniResult;

/// Read-only access to the document of record.
///
/// The pipeline reads a context snapshot once per request and never writes
/// through this interface; persisting an accepted continuation is the
/// caller's responsibility, after the pipeline returns.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch an immutable snapshot of the given document.
    async fn document_context(&self, document_id: &str) -> GoldoniResult<DocumentContext>;

    /// Fetch the document's title/description for prompt continuity.
    async fn script_metadata(&self, document_id: &str) -> GoldoniResult<ScriptMetadata> {
        let _ = document_id;
        Ok(ScriptMetadata::default())
    }
}
