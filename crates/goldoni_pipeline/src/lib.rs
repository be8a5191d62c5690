//! Continuation validation/retry pipeline for the Goldoni screenplay system.
//!
//! This crate takes a raw, untrusted generation from a non-deterministic
//! backend and deterministically converts it into a bounded, grammatically
//! valid sequence of tagged screenplay lines, retrying with corrective
//! feedback when it cannot.
//!
//! The pipeline is one sequential control flow per request: context window →
//! first-line constraint → prompt → backend invocation → sanitizer → grammar
//! validation (repair on the final attempt only) → bounds validation, looped
//! by the retry controller up to the request's attempt budget. Concurrent
//! requests are fully independent; the pipeline holds no state across
//! requests.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use goldoni_core::{ContinuationKind, ContinuationRequest, DocumentContext};
//! use goldoni_pipeline::ContinuationPipeline;
//!
//! let pipeline = ContinuationPipeline::new(driver);
//! let request = ContinuationRequest::builder()
//!     .context(DocumentContext::empty())
//!     .instruction("Open on a rain-soaked street.".to_string())
//!     .kind(ContinuationKind::ShortContinuation)
//!     .build()?;
//! let result = pipeline.continue_script(&request).await?;
//! println!("{}", result.script_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod bounds;
mod config;
mod envelope;
mod grammar;
mod prompt;
mod retry;
mod sanitize;
mod transitions;
mod window;

pub use adapter::{RawContinuation, RawEntry, RawPayload};
pub use bounds::{check_bounds, page_count};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use grammar::{repair_grammar, validate_grammar};
pub use sanitize::{sanitize_structured, sanitize_text, SanitizeOutcome};
pub use transitions::FirstLineConstraint;
pub use window::context_window;

use goldoni_core::{ContinuationKind, ContinuationRequest, ContinuationResult};
use goldoni_error::{ConfigError, GoldoniResult};
use goldoni_interface::{DocumentSource, GoldoniDriver};

/// The continuation pipeline, generic over an injected backend driver.
///
/// Holds no shared mutable state, caches, or locks: every request runs
/// independently, and the only suspension point is the backend call, which
/// is bounded by the configured timeout and cancellable by dropping the
/// future.
pub struct ContinuationPipeline<D: GoldoniDriver> {
    driver: D,
    config: PipelineConfig,
}

impl<D: GoldoniDriver> ContinuationPipeline<D> {
    /// Create a pipeline with the default configuration.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with an explicit configuration.
    pub fn with_config(driver: D, config: PipelineConfig) -> Self {
        Self { driver, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one continuation request to completion.
    ///
    /// # Errors
    ///
    /// Returns a single terminal error when no attempt within the request's
    /// budget passed validation (`ExhaustedRetries`, naming the last failure
    /// reason). Per-attempt failures are consumed internally as correction
    /// notes and never surface as errors. There is no partial or best-effort
    /// result.
    pub async fn continue_script(
        &self,
        request: &ContinuationRequest,
    ) -> GoldoniResult<ContinuationResult> {
        retry::run(&self.driver, &self.config, request).await
    }

    /// Fetch a document snapshot through `source` and continue it.
    ///
    /// Convenience wrapper for callers that keep their scripts behind a
    /// [`DocumentSource`]: reads the context and metadata once, builds the
    /// request, and runs it. The accepted lines are returned, not persisted;
    /// writing them back to the source is the caller's job.
    pub async fn continue_document<S: DocumentSource>(
        &self,
        source: &S,
        document_id: &str,
        instruction: impl Into<String>,
        kind: ContinuationKind,
    ) -> GoldoniResult<ContinuationResult> {
        let context = source.document_context(document_id).await?;
        let metadata = source.script_metadata(document_id).await?;

        let request = ContinuationRequest::builder()
            .context(context)
            .instruction(instruction.into())
            .kind(kind)
            .metadata(metadata)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        self.continue_script(&request).await
    }
}
