//! Core data types for the Goldoni screenplay continuation pipeline.
//!
//! This crate provides the foundation data types shared across the Goldoni
//! workspace: the screenplay tag vocabulary, tagged lines and document
//! snapshots, the per-kind continuation contract table, and the generic
//! request/response types for generative backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod kind;
mod line;
mod message;
mod metadata;
mod report;
mod request;
mod role;
mod tag;
mod wire;

pub use context::DocumentContext;
pub use kind::{Contract, ContinuationKind};
pub use line::TaggedLine;
pub use message::Message;
pub use metadata::ScriptMetadata;
pub use report::{ContinuationResult, ValidationReport};
pub use request::{ContinuationRequest, ContinuationRequestBuilder};
pub use role::Role;
pub use tag::Tag;
pub use wire::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output, ToolCall,
};
