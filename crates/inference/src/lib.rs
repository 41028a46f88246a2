//! Kindroid inference client for kinrelay.
//!
//! [`KindroidClient`] shapes a conversation into a request, sends it through an
//! [`InferenceTransport`](kinrelay_core::InferenceTransport), and classifies
//! the answer into an [`InferenceResult`](kinrelay_core::InferenceResult) or an
//! [`InferenceError`](kinrelay_core::InferenceError).

pub mod augment;
pub mod client;
pub mod http;
pub mod requester;
pub mod sanitize;

pub use augment::augment;
pub use client::KindroidClient;
pub use http::HttpTransport;
pub use requester::derive_requester_id;
pub use sanitize::strip_mass_mentions;

use kinrelay_config::ConfigError;
use kinrelay_core::error::TransportError;

/// Errors raised while wiring a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build transport: {0}")]
    Transport(#[from] TransportError),
}
