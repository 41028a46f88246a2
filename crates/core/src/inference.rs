//! Inference seam — the request sent to the remote service, the raw reply the
//! transport hands back, and the result taxonomy the invoker produces.
//!
//! The transport knows how to move bytes; it never interprets the body. All
//! classification lives in the invoker so every transport behaves the same.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::TransportError;
use crate::message::Conversation;

/// JSON body of an inference call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceRequest {
    /// Opaque code routing the request to a configured persona.
    pub share_code: String,

    /// The (already augmented) conversation, oldest first.
    pub conversation: Conversation,

    /// Ask the service to moderate its output.
    pub enable_filter: bool,
}

/// Status and body exactly as received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of a successful invocation.
///
/// Rate limiting is a value, not an error: callers back off without having to
/// inspect error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult {
    /// The service produced a reply (already sanitized).
    Success { reply: String },
    /// The service answered HTTP 429.
    RateLimited,
}

impl InferenceResult {
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Success { reply } => Some(reply),
            Self::RateLimited => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// The transport collaborator.
///
/// Implementations send one POST carrying `request` as JSON, with the bearer
/// credential and `requester_id` attached as headers, and return whatever
/// status and body came back. Any HTTP status, including 4xx and 5xx, is a
/// successful transport; `Err` is reserved for failures with no status at all.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// A human-readable name for logs (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Send a single request.
    async fn send(
        &self,
        requester_id: &str,
        request: &InferenceRequest,
    ) -> std::result::Result<RawResponse, TransportError>;
}
