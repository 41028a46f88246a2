//! Reply post-processing before the text is relayed into a group chat.

/// Mentions that would ping a whole server if relayed verbatim.
const MASS_MENTIONS: [&str; 2] = ["@everyone", "@here"];

/// Remove every exact, case-sensitive occurrence of `@everyone` and `@here`.
/// Nothing else in the reply is touched.
pub fn strip_mass_mentions(reply: &str) -> String {
    MASS_MENTIONS
        .iter()
        .fold(reply.to_string(), |text, mention| text.replace(mention, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_both_mentions() {
        assert_eq!(
            strip_mass_mentions("Hello @everyone, meet @here now"),
            "Hello , meet  now"
        );
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(strip_mass_mentions("@Everyone @HERE"), "@Everyone @HERE");
    }

    #[test]
    fn repeated_and_adjacent() {
        assert_eq!(strip_mass_mentions("@here@here@everyone!"), "!");
    }

    #[test]
    fn ordinary_mentions_untouched() {
        let reply = "thanks @alice, see you @ 5";
        assert_eq!(strip_mass_mentions(reply), reply);
    }
}
