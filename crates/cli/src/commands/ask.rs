//! `kinrelay ask` — single-message mode.

use kinrelay_core::message::ConversationMessage;

pub async fn run(
    share_code: &str,
    username: &str,
    message: &str,
    enable_filter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = [ConversationMessage::new(username, message)];
    super::send(share_code, &conversation, enable_filter).await
}
