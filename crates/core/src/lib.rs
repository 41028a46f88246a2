//! # kinrelay core
//!
//! Domain types, traits, and error definitions for relaying conversations to
//! the Kindroid inference service. This crate has **no transport or runtime
//! dependencies**; it defines the model that the other crates build on.
//!
//! ## Layout
//!
//! - [`message`]: conversation messages as they travel on the wire
//! - [`context`]: operator-supplied text injected ahead of a conversation
//! - [`inference`]: the outbound request, the result taxonomy, and the
//!   transport seam the invoker talks through
//! - [`error`]: the closed set of failures an invocation can raise

pub mod context;
pub mod error;
pub mod inference;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use context::{AugmentationContext, ContextSource};
pub use error::{InferenceError, Result, TransportError};
pub use inference::{InferenceRequest, InferenceResult, InferenceTransport, RawResponse};
pub use message::{Conversation, ConversationMessage, SYSTEM_USERNAME};
