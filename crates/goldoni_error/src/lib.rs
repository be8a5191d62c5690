//! Error types for the Goldoni screenplay continuation pipeline.
//!
//! This crate provides the foundation error types used throughout the Goldoni
//! workspace.
//!
//! # Error Hierarchy
//!
//! Each concern gets its own error struct with source location tracking, and
//! `PipelineError` additionally carries a `PipelineErrorKind` enum of the
//! specific validation failures. All constructors use `#[track_caller]` for
//! automatic location capture, and everything converts into the boxed
//! top-level `GoldoniError`.
//!
//! # Examples
//!
//! ```
//! use goldoni_error::{GoldoniResult, BackendError};
//!
//! fn call_model() -> GoldoniResult<String> {
//!     Err(BackendError::new("Connection refused"))?
//! }
//!
//! match call_model() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod pipeline;

pub use backend::BackendError;
pub use config::ConfigError;
pub use error::{GoldoniError, GoldoniErrorKind, GoldoniResult};
pub use pipeline::{PipelineError, PipelineErrorKind};
