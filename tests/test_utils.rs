//! Shared test infrastructure: stub request wrappers for driving the retry
//! controller without a real backend.

use async_trait::async_trait;
use kinex::gateway::{ChatTurn, GatewayError, LlmRequest, LlmResponse};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

/// Build a stub response with the given answer text.
pub fn response(content: &str, usage: u64, truncated: bool) -> LlmResponse {
    LlmResponse {
        raw: serde_json::json!({ "stub": true }),
        content: content.to_string(),
        usage,
        truncated,
    }
}

/// A request wrapper that fails every call.
#[derive(Default)]
pub struct FailingRequest {
    pub calls: AtomicU32,
}

impl FailingRequest {
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmRequest for FailingRequest {
    async fn request(
        &self,
        _turns: &[ChatTurn],
        _instruction: &str,
    ) -> Result<LlmResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::MalformedResponse(
            "stub backend always fails".to_string(),
        ))
    }
}

/// A request wrapper that replays a fixed script of replies in order.
///
/// `Err(message)` entries become gateway errors; running past the end of
/// the script is a test bug and panics.
pub struct ScriptedRequest {
    replies: Mutex<VecDeque<Result<LlmResponse, String>>>,
    pub calls: AtomicU32,
}

impl ScriptedRequest {
    pub fn new(replies: Vec<Result<LlmResponse, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmRequest for ScriptedRequest {
    async fn request(
        &self,
        _turns: &[ChatTurn],
        _instruction: &str,
    ) -> Result<LlmResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .pop_front()
            .expect("ScriptedRequest ran out of scripted replies");
        reply.map_err(GatewayError::MalformedResponse)
    }
}
