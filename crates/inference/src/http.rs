//! HTTP transport for the Kindroid inference endpoint.

use std::time::Duration;

use async_trait::async_trait;
use kinrelay_core::error::TransportError;
use kinrelay_core::inference::{InferenceRequest, InferenceTransport, RawResponse};
use tracing::debug;

/// Header carrying the derived requester tag.
pub const REQUESTER_HEADER: &str = "X-Kindroid-Requester";

/// Sends inference requests over HTTPS with reqwest.
///
/// Only moves bytes: every status code comes back as a [`RawResponse`] and
/// the invoker decides what it means.
pub struct HttpTransport {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `endpoint`, authenticating with `api_key`.
    ///
    /// The timeout covers the whole round trip; hitting it surfaces as
    /// [`TransportError::Timeout`].
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(
        &self,
        requester_id: &str,
        request: &InferenceRequest,
    ) -> Result<RawResponse, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            messages = request.conversation.len(),
            requester = requester_id,
            "Sending inference request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header(REQUESTER_HEADER, requester_id)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(e.to_string())
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let transport = HttpTransport::new(
            "https://api.kindroid.ai/v1/discord-bot/",
            "kn_test",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(transport.endpoint(), "https://api.kindroid.ai/v1/discord-bot");
        assert_eq!(transport.name(), "http");
    }

    #[test]
    fn debug_hides_api_key() {
        let transport =
            HttpTransport::new("http://localhost:1", "kn_secret", Duration::from_secs(5)).unwrap();
        let out = format!("{transport:?}");
        assert!(!out.contains("kn_secret"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // Grab a free port, then release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = HttpTransport::new(
            format!("http://127.0.0.1:{port}"),
            "kn_test",
            Duration::from_secs(5),
        )
        .unwrap();
        let request = InferenceRequest {
            share_code: "code".into(),
            conversation: vec![],
            enable_filter: false,
        };
        let err = transport.send("rid", &request).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
