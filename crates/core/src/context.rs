//! Augmentation context — operator text injected ahead of a conversation.

use serde::{Deserialize, Serialize};

/// Three independent optional text blocks.
///
/// Values are kept raw; trimming and the "empty means absent" rule are applied
/// by [`AugmentationContext::preamble`] and friends so every reader agrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationContext {
    /// Persona / behavior instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,

    /// Long-term memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_memory: Option<String>,

    /// Evolving, short-lived memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_memory: Option<String>,
}

impl AugmentationContext {
    pub fn preamble(&self) -> Option<&str> {
        present(&self.preamble)
    }

    pub fn global_memory(&self) -> Option<&str> {
        present(&self.global_memory)
    }

    pub fn dynamic_memory(&self) -> Option<&str> {
        present(&self.dynamic_memory)
    }

    /// True when no block survives trimming.
    pub fn is_empty(&self) -> bool {
        self.preamble().is_none()
            && self.global_memory().is_none()
            && self.dynamic_memory().is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Where the invoker gets its augmentation context from.
///
/// Called once per invocation, so implementations backed by mutable
/// configuration pick up changes without a restart.
pub trait ContextSource: Send + Sync {
    fn load(&self) -> AugmentationContext;
}

/// A fixed context, mostly useful in tests and embedded setups.
impl ContextSource for AugmentationContext {
    fn load(&self) -> AugmentationContext {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_absent() {
        let ctx = AugmentationContext {
            preamble: Some("  \n\t ".into()),
            global_memory: None,
            dynamic_memory: Some(String::new()),
        };
        assert!(ctx.preamble().is_none());
        assert!(ctx.dynamic_memory().is_none());
        assert!(ctx.is_empty());
    }

    #[test]
    fn values_are_trimmed() {
        let ctx = AugmentationContext {
            global_memory: Some("\n  likes tea  \n".into()),
            ..Default::default()
        };
        assert_eq!(ctx.global_memory(), Some("likes tea"));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn static_source_returns_itself() {
        let ctx = AugmentationContext {
            preamble: Some("be kind".into()),
            ..Default::default()
        };
        assert_eq!(ctx.load(), ctx);
    }
}
