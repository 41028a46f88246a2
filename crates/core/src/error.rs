//! Error types for the kinrelay domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every failure an
//! invocation can raise belongs to a small closed set so callers can branch on
//! the kind instead of parsing message text. Rate limiting is deliberately
//! absent here: it is a normal [`crate::InferenceResult`] case.

use thiserror::Error;

/// Message surfaced when the remote service gives no usable explanation.
pub const GENERIC_FAILURE: &str = "Failed to get response from Kindroid";

/// The top-level error type for an inference invocation.
///
/// `Display` is the human-readable message only, so callers that just print
/// the error see exactly what the remote service said.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// The caller supplied an empty conversation. Raised before any network
    /// activity.
    #[error("Conversation cannot be empty")]
    EmptyConversation,

    /// The service answered but reported `success: false` (or omitted it).
    #[error("{message}")]
    RemoteRejection { message: String },

    /// The transport layer failed: non-2xx status, unreadable body, network
    /// error or timeout.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
}

impl InferenceError {
    /// A rejection carrying the service's message, or the generic fallback.
    pub fn rejected(message: Option<String>) -> Self {
        Self::RemoteRejection {
            message: non_empty_or_generic(message),
        }
    }

    /// A transport failure carrying the service's message, or the generic
    /// fallback.
    pub fn transport(status: Option<u16>, message: Option<String>) -> Self {
        Self::Transport {
            status,
            message: non_empty_or_generic(message),
        }
    }

    /// HTTP status attached to the failure, if the transport got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyConversation => "validation",
            Self::RemoteRejection { .. } => "remote_rejection",
            Self::Transport { .. } => "transport",
        }
    }
}

fn non_empty_or_generic(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// Result type alias using [`InferenceError`].
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Failures raised by an [`crate::InferenceTransport`] before any HTTP status
/// was received.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<TransportError> for InferenceError {
    fn from(_: TransportError) -> Self {
        Self::transport(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_remote_message_verbatim() {
        let err = InferenceError::rejected(Some("bad share code".into()));
        assert_eq!(err.to_string(), "bad share code");
        assert_eq!(err.kind(), "remote_rejection");
    }

    #[test]
    fn missing_or_blank_message_falls_back() {
        assert_eq!(InferenceError::rejected(None).to_string(), GENERIC_FAILURE);
        assert_eq!(
            InferenceError::transport(Some(500), Some("  ".into())).to_string(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn transport_keeps_status() {
        let err = InferenceError::transport(Some(502), Some("upstream down".into()));
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "upstream down");
        assert_eq!(InferenceError::EmptyConversation.status(), None);
    }

    #[test]
    fn network_error_becomes_generic_transport_failure() {
        let err: InferenceError = TransportError::Network("connection refused".into()).into();
        assert_eq!(
            err,
            InferenceError::Transport {
                status: None,
                message: GENERIC_FAILURE.into(),
            }
        );
    }
}
