//! Trait definitions for generative backends.

use async_trait::async_trait;
use goldoni_core::{GenerateRequest, GenerateResponse};
use goldoni_error::GoldoniResult;

/// Core trait that all generative backends must implement.
///
/// The pipeline owns a driver by injection; there is no global client. A
/// driver call must be bounded by a timeout on the pipeline side and remains
/// cancellable by dropping the returned future.
#[async_trait]
pub trait GoldoniDriver: Send + Sync {
    /// Generate model output given a request.
    ///
    /// Drivers that honor `request.response_schema` should return
    /// `Output::Json` or `Output::ToolCalls`; others return `Output::Text`
    /// and the pipeline falls back to free-text parsing.
    async fn generate(&self, req: &GenerateRequest) -> GoldoniResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic", "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-5").
    fn model_name(&self) -> &str;
}
