use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Immutable snapshot of the process environment.
///
/// Taken once after `.env` is loaded and passed by reference to everything that reads
/// configuration, so nothing mutates or re-reads the real environment mid-run.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Raw value, including empty strings.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Trimmed value, `None` when unset or blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Boolean-ish flag: `1|true|yes|on` and `0|false|no|off`, anything else is `default`.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => parse_flag(value).unwrap_or(default),
            None => default,
        }
    }

    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        self.get(key)
            .and_then(|value| value.trim().parse::<T>().ok())
            .unwrap_or(default)
    }
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Env, parse_flag};

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn flag_falls_back_to_default() {
        let env = Env::from_pairs([("REACTIONS_ENABLED", "banana")]);
        assert!(env.flag("REACTIONS_ENABLED", true));
        assert!(!env.flag("MISSING", false));
    }

    #[test]
    fn non_empty_trims_blank_values() {
        let env = Env::from_pairs([("A", "  "), ("B", " x ")]);
        assert_eq!(env.non_empty("A"), None);
        assert_eq!(env.non_empty("B"), Some("x"));
        assert_eq!(env.get("A"), Some("  "));
    }

    #[test]
    fn parse_or_uses_default_on_garbage() {
        let env = Env::from_pairs([("NYAH_WEB_PORT", "eighty")]);
        assert_eq!(env.parse_or("NYAH_WEB_PORT", 8000_u16), 8000);
        let env = Env::from_pairs([("NYAH_WEB_PORT", "9000")]);
        assert_eq!(env.parse_or("NYAH_WEB_PORT", 8000_u16), 9000);
    }
}
