//! Request and response types for generative backends.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// When `response_schema` is set, drivers that support a structured output
/// mode should constrain the response to that JSON schema; drivers without
/// one may ignore it, and the pipeline degrades to free-text parsing.
///
/// # Examples
///
/// ```
/// use goldoni_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::new(Role::User, "Hello!")])
///     .max_tokens(Some(100))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
    /// JSON schema for structured output, if the driver supports it
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

/// Supported output types from generative backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),

    /// Tool/function calls requested by the model.
    ToolCalls(Vec<ToolCall>),
}

/// A tool/function call made by the model.
///
/// # Examples
///
/// ```
/// use goldoni_core::ToolCall;
/// use serde_json::json;
///
/// let call = ToolCall {
///     id: "call_123".to_string(),
///     name: "write_lines".to_string(),
///     arguments: json!({"lines": []}),
/// };
///
/// assert_eq!(call.name, "write_lines");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool/function to call
    pub name: String,
    /// Arguments to pass to the tool (as JSON)
    pub arguments: serde_json::Value,
}
