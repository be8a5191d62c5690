//! Test utilities for Goldoni pipeline tests.
//!
//! Provides a scripted mock driver for fast, deterministic testing without a
//! real backend.

use async_trait::async_trait;
use goldoni_core::{GenerateRequest, GenerateResponse, Output};
use goldoni_error::{BackendError, GoldoniResult};
use goldoni_interface::GoldoniDriver;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted backend reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Structured JSON output
    Json(serde_json::Value),
    /// Free-text output
    Text(String),
    /// Transport failure
    Error(String),
    /// Never responds within any reasonable test timeout
    Hang,
}

/// Mock driver returning scripted replies per call, in order. The last reply
/// repeats once the script runs out.
///
/// Cloning shares state, so a test can keep a handle for assertions after
/// handing the driver to the pipeline.
#[derive(Clone)]
pub struct MockDriver {
    inner: Arc<MockDriverInner>,
}

struct MockDriverInner {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
    calls: AtomicUsize,
}

impl MockDriver {
    /// A driver that plays back the given replies, one per call.
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self {
            inner: Arc::new(MockDriverInner {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// A driver that always succeeds with the same structured payload.
    pub fn always_json(value: serde_json::Value) -> Self {
        Self::scripted(vec![MockReply::Json(value)])
    }

    /// Number of calls made so far.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// All message content of the nth request (0-based), joined.
    #[allow(dead_code)]
    pub fn prompt_content(&self, n: usize) -> String {
        let requests = self.inner.requests.lock().unwrap();
        requests[n]
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl GoldoniDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> GoldoniResult<GenerateResponse> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.requests.lock().unwrap().push(req.clone());

        let reply = {
            let mut replies = self.inner.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };

        match reply {
            Some(MockReply::Json(value)) => Ok(GenerateResponse {
                outputs: vec![Output::Json(value)],
            }),
            Some(MockReply::Text(text)) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            Some(MockReply::Error(message)) => Err(BackendError::new(message).into()),
            Some(MockReply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("pipeline timeout should fire first")
            }
            None => Err(BackendError::new("mock script exhausted").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-scripted"
    }
}

/// Build a structured `lines` payload from (tag, text) pairs.
pub fn lines_payload(lines: &[(&str, &str)], message: Option<&str>) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = lines
        .iter()
        .map(|(tag, text)| serde_json::json!({"tag": tag, "text": text}))
        .collect();
    match message {
        Some(msg) => serde_json::json!({"lines": entries, "assistantResponse": msg}),
        None => serde_json::json!({"lines": entries}),
    }
}

/// A payload of `n` plain action lines.
pub fn action_payload(n: usize) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = (0..n)
        .map(|i| serde_json::json!({"tag": "action", "text": format!("Beat {i}.")}))
        .collect();
    serde_json::json!({"lines": entries})
}
