//! Requester identifier derivation.
//!
//! The service attributes requests through the `X-Kindroid-Requester` header.
//! The raw display name never goes into a header; it is turned into a short
//! alphanumeric tag instead. The tag is best-effort: not reversible and not
//! guaranteed unique.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Upper bound on the tag length.
pub const MAX_REQUESTER_ID_LEN: usize = 32;

/// Percent-encode, base64, keep `[A-Za-z0-9]`, truncate to 32 characters.
///
/// Total over every input; an empty username yields an empty tag.
pub fn derive_requester_id(username: &str) -> String {
    let escaped = urlencoding::encode(username);
    STANDARD
        .encode(escaped.as_bytes())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_REQUESTER_ID_LEN)
        .collect()
}
