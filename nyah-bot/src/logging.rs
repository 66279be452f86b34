use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// `LOG_LEVEL` value to a tracing level; unknown names fall back to info.
pub fn parse_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "warning" => Level::WARN,
        "critical" | "fatal" => Level::ERROR,
        other => other.parse().unwrap_or(Level::INFO),
    }
}

pub fn init(raw_level: &str) {
    let max_level = parse_level(raw_level);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(move |metadata| {
        let target = metadata.target();

        if *metadata.level() > max_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::parse_level;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level(" warning "), Level::WARN);
        assert_eq!(parse_level("CRITICAL"), Level::ERROR);
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }
}
