//! Model invocation adapter.
//!
//! Sends the assembled messages plus a structured output schema to the
//! injected driver and extracts a payload from whatever came back. Backends
//! that honor the schema return JSON or a tool call; others return free text,
//! which is searched for JSON (code fences, balanced braces) before being
//! handed to the sanitizer as raw tagged text.

use crate::PipelineConfig;
use goldoni_core::{GenerateRequest, Message, Output};
use goldoni_error::PipelineErrorKind;
use goldoni_interface::{GoldoniDriver, ToolDefinition};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One loosely-typed line entry from the backend payload.
///
/// The tag is kept as a raw string; the sanitizer owns coercion into the
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    /// Tag name as the model wrote it
    pub tag: String,
    /// Line content as the model wrote it
    #[serde(default)]
    pub text: String,
}

/// What one backend invocation produced, before sanitization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// The backend honored the schema: an ordered list of entries.
    Structured(Vec<RawEntry>),
    /// Free text; may contain tagged markup or nothing recognizable.
    Text(String),
}

/// Adapter output for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RawContinuation {
    /// The payload to sanitize
    pub payload: RawPayload,
    /// The model's own caller-facing message, if it supplied one
    pub assistant_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredReply {
    #[serde(default)]
    lines: Option<Vec<RawEntry>>,
    #[serde(default)]
    formatted_script: Option<String>,
    #[serde(default, alias = "assistantMessage")]
    assistant_response: Option<String>,
}

/// The function-call schema sent with every request.
pub(crate) fn continuation_schema() -> ToolDefinition {
    ToolDefinition {
        name: "write_script_lines".to_string(),
        description: "Deliver the screenplay continuation as tagged lines".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "lines": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "tag": {
                                "type": "string",
                                "enum": [
                                    "header", "action", "speaker",
                                    "dialog", "directions", "chapter-break"
                                ]
                            },
                            "text": {"type": "string"}
                        },
                        "required": ["tag", "text"]
                    }
                },
                "assistantResponse": {
                    "type": "string",
                    "description": "One short sentence for the writer"
                }
            },
            "required": ["lines"]
        }),
    }
}

/// Invoke the driver once, bounded by the configured timeout.
///
/// A timeout or transport failure maps to an `Invocation` attempt failure; a
/// response with no usable payload maps to `PayloadParse`. Neither is fatal
/// to the pipeline, only to this attempt.
pub(crate) async fn invoke<D: GoldoniDriver>(
    driver: &D,
    messages: Vec<Message>,
    config: &PipelineConfig,
) -> Result<RawContinuation, PipelineErrorKind> {
    let schema = continuation_schema();
    let request = GenerateRequest::builder()
        .messages(messages)
        .max_tokens(*config.max_tokens())
        .temperature(*config.temperature())
        .model(config.model().clone())
        .response_schema(Some(schema.parameters.clone()))
        .build()
        .map_err(|e| PipelineErrorKind::Invocation(format!("failed to build request: {e}")))?;

    tracing::debug!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        timeout_secs = config.invocation_timeout().as_secs(),
        "Invoking generative backend"
    );

    let response = match tokio::time::timeout(*config.invocation_timeout(), driver.generate(&request))
        .await
    {
        Err(_) => {
            return Err(PipelineErrorKind::Invocation(format!(
                "backend timed out after {}s",
                config.invocation_timeout().as_secs()
            )));
        }
        Ok(Err(e)) => {
            return Err(PipelineErrorKind::Invocation(e.to_string()));
        }
        Ok(Ok(response)) => response,
    };

    extract_continuation(&response.outputs)
}

/// Pull a payload out of the response outputs.
///
/// Preference order: structured JSON output, tool-call arguments, JSON found
/// inside free text, then the free text itself as raw tagged markup.
pub(crate) fn extract_continuation(
    outputs: &[Output],
) -> Result<RawContinuation, PipelineErrorKind> {
    let mut text = String::new();

    for output in outputs {
        match output {
            Output::Json(value) => {
                if let Some(parsed) = from_json_value(value) {
                    return Ok(parsed);
                }
            }
            Output::ToolCalls(calls) => {
                for call in calls {
                    if let Some(parsed) = from_json_value(&call.arguments) {
                        return Ok(parsed);
                    }
                }
            }
            Output::Text(chunk) => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(chunk);
            }
        }
    }

    if let Some(json_str) = extract_json(&text) {
        if let Ok(value) = serde_json::from_str::<JsonValue>(&json_str) {
            if let Some(parsed) = from_json_value(&value) {
                return Ok(parsed);
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::warn!(
            output_count = outputs.len(),
            "Backend response contained no usable payload"
        );
        return Err(PipelineErrorKind::PayloadParse(
            "backend response contained no structured payload and no text".to_string(),
        ));
    }

    Ok(RawContinuation {
        payload: RawPayload::Text(trimmed.to_string()),
        assistant_message: None,
    })
}

fn from_json_value(value: &JsonValue) -> Option<RawContinuation> {
    let reply: StructuredReply = serde_json::from_value(value.clone()).ok()?;

    if let Some(lines) = reply.lines {
        return Some(RawContinuation {
            payload: RawPayload::Structured(lines),
            assistant_message: reply.assistant_response,
        });
    }
    if let Some(script) = reply.formatted_script {
        return Some(RawContinuation {
            payload: RawPayload::Text(script),
            assistant_message: reply.assistant_response,
        });
    }
    None
}

/// Extract JSON from text that may contain markdown fences or prose.
fn extract_json(text: &str) -> Option<String> {
    if let Some(json) = extract_from_code_block(text) {
        return Some(json);
    }
    extract_balanced(text, '{', '}')
}

fn extract_from_code_block(text: &str) -> Option<String> {
    let start = text.find("```")?;
    let content_start = start + 3;
    // Skip a language specifier if present.
    let skip_to = text[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match text[skip_to..].find("```") {
        Some(end) => Some(text[skip_to..skip_to + end].trim().to_string()),
        // No closing fence, likely a truncated response.
        None => Some(text[skip_to..].trim().to_string()),
    }
}

/// Extract content between balanced delimiters, handling nesting and string
/// escapes.
fn extract_balanced(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldoni_core::ToolCall;

    #[test]
    fn test_structured_json_output() {
        let value = serde_json::json!({
            "lines": [{"tag": "action", "text": "She runs."}],
            "assistantResponse": "Added a beat."
        });
        let raw = extract_continuation(&[Output::Json(value)]).unwrap();
        assert_eq!(raw.assistant_message.as_deref(), Some("Added a beat."));
        match raw.payload {
            RawPayload::Structured(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].tag, "action");
            }
            RawPayload::Text(_) => panic!("expected structured payload"),
        }
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "write_script_lines".to_string(),
            arguments: serde_json::json!({
                "lines": [{"tag": "header", "text": "INT. LAB - NIGHT"}]
            }),
        };
        let raw = extract_continuation(&[Output::ToolCalls(vec![call])]).unwrap();
        assert!(matches!(raw.payload, RawPayload::Structured(_)));
    }

    #[test]
    fn test_json_inside_code_fence() {
        let text = "Here you go:\n```json\n{\"lines\": [{\"tag\": \"action\", \"text\": \"Rain.\"}]}\n```\n";
        let raw = extract_continuation(&[Output::Text(text.to_string())]).unwrap();
        assert!(matches!(raw.payload, RawPayload::Structured(_)));
    }

    #[test]
    fn test_formatted_script_field() {
        let value = serde_json::json!({
            "formattedScript": "<action>Rain.</action>",
            "assistantResponse": "Done."
        });
        let raw = extract_continuation(&[Output::Json(value)]).unwrap();
        assert_eq!(
            raw.payload,
            RawPayload::Text("<action>Rain.</action>".to_string())
        );
    }

    #[test]
    fn test_plain_text_falls_through_as_raw() {
        let raw =
            extract_continuation(&[Output::Text("<action>Rain.</action>".to_string())]).unwrap();
        assert_eq!(
            raw.payload,
            RawPayload::Text("<action>Rain.</action>".to_string())
        );
    }

    #[test]
    fn test_empty_response_is_payload_parse_error() {
        let err = extract_continuation(&[Output::Text("   ".to_string())]).unwrap_err();
        assert!(matches!(err, PipelineErrorKind::PayloadParse(_)));
    }

    #[test]
    fn test_balanced_extraction_ignores_braces_in_strings() {
        let text = r#"prefix {"lines": [{"tag": "dialog", "text": "ends with }"}]} suffix"#;
        let json = extract_json(text).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        let value: JsonValue = serde_json::from_str(&json).unwrap();
        assert!(value.get("lines").is_some());
    }
}
