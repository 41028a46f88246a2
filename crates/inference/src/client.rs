//! The inference invoker.
//!
//! One call: validate → augment → derive requester id → one transport round
//! trip → classify. Nothing is cached between calls; the augmentation context
//! is loaded fresh each time.

use std::sync::Arc;
use std::time::Duration;

use kinrelay_config::{AppConfig, LiveContextSource};
use kinrelay_core::context::ContextSource;
use kinrelay_core::error::{InferenceError, Result};
use kinrelay_core::inference::{InferenceRequest, InferenceResult, InferenceTransport, RawResponse};
use kinrelay_core::message::ConversationMessage;
use serde_json::Value;
use tracing::{debug, warn};

use crate::augment::augment;
use crate::http::HttpTransport;
use crate::requester::derive_requester_id;
use crate::sanitize::strip_mass_mentions;
use crate::SetupError;

/// Client for the Kindroid inference API.
#[derive(Clone)]
pub struct KindroidClient {
    transport: Arc<dyn InferenceTransport>,
    context: Arc<dyn ContextSource>,
}

impl KindroidClient {
    pub fn new(transport: Arc<dyn InferenceTransport>, context: Arc<dyn ContextSource>) -> Self {
        Self { transport, context }
    }

    /// Wire the HTTP transport from loaded configuration, with a context
    /// source that re-reads the config file and environment on every call.
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, SetupError> {
        let api_key = config.require_api_key()?;
        let transport = HttpTransport::new(
            &config.endpoint,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )?;
        let context = LiveContextSource::from_default_path();
        Ok(Self::new(Arc::new(transport), Arc::new(context)))
    }

    /// Send `conversation` and classify the answer.
    ///
    /// Returns [`InferenceResult::RateLimited`] on HTTP 429 instead of an
    /// error. Every other failure is an [`InferenceError`].
    pub async fn invoke(
        &self,
        share_code: &str,
        conversation: &[ConversationMessage],
        enable_filter: bool,
    ) -> Result<InferenceResult> {
        if conversation.is_empty() {
            warn!(share_code, "Refusing to invoke with an empty conversation");
            return Err(InferenceError::EmptyConversation);
        }

        let context = self.context.load();
        let augmented = augment(conversation, &context);
        let requester_id = augmented
            .last()
            .map(|m| derive_requester_id(&m.username))
            .unwrap_or_default();

        let request = InferenceRequest {
            share_code: share_code.to_string(),
            conversation: augmented.into_owned(),
            enable_filter,
        };

        debug!(
            transport = self.transport.name(),
            share_code,
            messages = request.conversation.len(),
            requester = %requester_id,
            enable_filter,
            "Invoking inference"
        );

        let raw = match self.transport.send(&requester_id, &request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(transport = self.transport.name(), error = %e, "Inference transport failed");
                return Err(e.into());
            }
        };

        classify(raw)
    }

    /// [`invoke`](Self::invoke) with the content filter off.
    pub async fn invoke_unfiltered(
        &self,
        share_code: &str,
        conversation: &[ConversationMessage],
    ) -> Result<InferenceResult> {
        self.invoke(share_code, conversation, false).await
    }
}

/// Response body as far as its shape is known. Every field is optional and
/// read on its own, so a stray type in one field never hides the others.
#[derive(Debug)]
struct ApiReply {
    success: Option<bool>,
    reply: Option<String>,
    error: Option<String>,
}

/// A body is either a JSON object we can read or something else entirely.
#[derive(Debug)]
enum ResponseBody {
    Known(ApiReply),
    Unknown,
}

impl ResponseBody {
    fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => {
                let text = |key: &str| {
                    fields.get(key).and_then(Value::as_str).map(str::to_string)
                };
                Self::Known(ApiReply {
                    success: fields.get("success").and_then(Value::as_bool),
                    reply: text("reply"),
                    error: text("error"),
                })
            }
            _ => Self::Unknown,
        }
    }

    fn error_message(self) -> Option<String> {
        match self {
            Self::Known(reply) => reply.error,
            Self::Unknown => None,
        }
    }
}

/// Map a raw response onto the result taxonomy.
///
/// 429 is checked before anything else, so a rate-limited response is never
/// reported as a failure even if its body carries an error message.
fn classify(raw: RawResponse) -> Result<InferenceResult> {
    let status = raw.status;

    if status == 429 {
        warn!(status, body = %raw.body, "Rate limited by Kindroid");
        return Ok(InferenceResult::RateLimited);
    }

    let body = ResponseBody::parse(&raw.body);

    if !raw.is_success() {
        warn!(status, body = %raw.body, "Kindroid returned an error status");
        return Err(InferenceError::transport(Some(status), body.error_message()));
    }

    let reply = match body {
        ResponseBody::Known(reply) => reply,
        ResponseBody::Unknown => {
            warn!(status, body = %raw.body, "Unreadable response body");
            return Err(InferenceError::transport(Some(status), None));
        }
    };

    match reply {
        ApiReply {
            success: Some(true),
            reply: Some(text),
            ..
        } if !text.is_empty() => Ok(InferenceResult::Success {
            reply: strip_mass_mentions(&text),
        }),
        other => {
            warn!(
                status,
                success = ?other.success,
                error = ?other.error,
                body = %raw.body,
                "Kindroid reported failure"
            );
            Err(InferenceError::rejected(other.error))
        }
    }
}
