/// Content after `prefix`, or `None` when the message does not start with it.
pub fn strip_prefix<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    content.strip_prefix(prefix)
}

/// First whitespace token after the prefix, lowercased.
pub fn command_name(content: &str, prefix: &str) -> Option<String> {
    strip_prefix(content, prefix)?
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
}

/// Parse a raw user id or mention token (`123`, `<@123>`, `<@!123>`).
pub fn parse_user_token(raw: &str) -> Option<u64> {
    raw.trim()
        .trim_matches(|c| matches!(c, '<' | '@' | '!' | '>'))
        .parse::<u64>()
        .ok()
}

/// Remove both mention spellings of `user_id` and trim the rest.
pub fn strip_user_mention(content: &str, user_id: u64) -> String {
    content
        .trim()
        .replace(&format!("<@{user_id}>"), "")
        .replace(&format!("<@!{user_id}>"), "")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::{command_name, parse_user_token, strip_prefix, strip_user_mention};

    #[test]
    fn prefix_stripping() {
        assert_eq!(strip_prefix("!ping", "!"), Some("ping"));
        assert_eq!(strip_prefix("ping", "!"), None);
        assert_eq!(strip_prefix("ping", ""), None);
        assert_eq!(strip_prefix("nyah help", "nyah "), Some("help"));
    }

    #[test]
    fn command_names_are_lowercased_first_tokens() {
        assert_eq!(command_name("!Crown <@1>", "!"), Some("crown".to_owned()));
        assert_eq!(command_name("!   ", "!"), None);
        assert_eq!(command_name("hello", "!"), None);
    }

    #[test]
    fn user_tokens_accept_mentions_and_raw_ids() {
        assert_eq!(parse_user_token("123"), Some(123));
        assert_eq!(parse_user_token("<@123>"), Some(123));
        assert_eq!(parse_user_token("<@!123>"), Some(123));
        assert_eq!(parse_user_token("<#123>"), None);
        assert_eq!(parse_user_token("someone"), None);
    }

    #[test]
    fn mention_stripping_handles_both_forms() {
        assert_eq!(strip_user_mention("<@42> quoi ?", 42), "quoi ?");
        assert_eq!(strip_user_mention("  hey <@!42>, ça va ? ", 42), "hey , ça va ?");
        assert_eq!(strip_user_mention("<@43> hi", 42), "<@43> hi");
    }
}
