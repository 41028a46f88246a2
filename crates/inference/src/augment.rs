//! Conversation augmentation.
//!
//! Operator-supplied persona and memory text travels to the service as one
//! synthetic message from the reserved `system` speaker, placed ahead of the
//! caller's transcript.

use std::borrow::Cow;

use kinrelay_core::context::AugmentationContext;
use kinrelay_core::message::ConversationMessage;

pub const PREAMBLE_LABEL: &str = "Behavior and persona instructions";
pub const GLOBAL_MEMORY_LABEL: &str = "Long-term memory";
pub const DYNAMIC_MEMORY_LABEL: &str = "Dynamic memory";

/// Placed between labeled blocks: blank line, marker, blank line.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Join the present blocks, always in preamble → global → dynamic order.
///
/// Returns `None` when every block is absent after trimming.
pub fn system_text(context: &AugmentationContext) -> Option<String> {
    let blocks: Vec<String> = [
        (PREAMBLE_LABEL, context.preamble()),
        (GLOBAL_MEMORY_LABEL, context.global_memory()),
        (DYNAMIC_MEMORY_LABEL, context.dynamic_memory()),
    ]
    .into_iter()
    .filter_map(|(label, text)| text.map(|t| format!("{label}:\n{t}")))
    .collect();

    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join(BLOCK_SEPARATOR))
    }
}

/// Build the outbound conversation.
///
/// With no context the input is handed back borrowed and untouched; otherwise
/// a new sequence is returned with the system message first and the input
/// messages after it in their original order.
pub fn augment<'a>(
    conversation: &'a [ConversationMessage],
    context: &AugmentationContext,
) -> Cow<'a, [ConversationMessage]> {
    match system_text(context) {
        None => Cow::Borrowed(conversation),
        Some(text) => {
            let mut out = Vec::with_capacity(conversation.len() + 1);
            out.push(ConversationMessage::system(text));
            out.extend_from_slice(conversation);
            Cow::Owned(out)
        }
    }
}
