//! Trait definitions for the Goldoni screenplay continuation pipeline.
//!
//! This crate provides the seams between the pipeline and its external
//! collaborators: the generative backend and the document source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod source;
mod traits;
mod types;

pub use source::DocumentSource;
pub use traits::GoldoniDriver;
pub use types::ToolDefinition;
