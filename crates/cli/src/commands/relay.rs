//! `kinrelay relay` — send a transcript stored as JSON.

use std::path::Path;

use kinrelay_core::message::Conversation;

pub async fn run(
    share_code: &str,
    transcript: &Path,
    enable_filter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = read_transcript(transcript)?;
    tracing::debug!(
        path = %transcript.display(),
        messages = conversation.len(),
        "Loaded transcript"
    );
    super::send(share_code, &conversation, enable_filter).await
}

/// Parse a `[{"username": .., "text": ..}]` file.
pub fn read_transcript(path: &Path) -> Result<Conversation, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read transcript {}: {e}", path.display()))?;
    let conversation: Conversation = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid transcript {}: {e}", path.display()))?;
    Ok(conversation)
}
