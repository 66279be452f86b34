use nyah_config::Env;
use nyah_utils::DEFAULT_COMMAND_PREFIX;

#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: Option<String>,
    pub prefix: String,
    pub use_members_intent: bool,
    pub log_level: String,
}

impl BotConfig {
    pub fn from_env(env: &Env) -> Self {
        Self {
            token: env.non_empty("DISCORD_TOKEN").map(str::to_owned),
            prefix: command_prefix(env),
            use_members_intent: env.flag("USE_MEMBERS_INTENT", true),
            log_level: env.get_or("LOG_LEVEL", "info").trim().to_owned(),
        }
    }
}

/// `PREFIX`, falling back to `!`.
pub fn command_prefix(env: &Env) -> String {
    env.get_or("PREFIX", DEFAULT_COMMAND_PREFIX).to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl WebConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8000;

    pub fn from_env(env: &Env) -> Self {
        Self {
            host: env
                .non_empty("NYAH_WEB_HOST")
                .unwrap_or(Self::DEFAULT_HOST)
                .to_owned(),
            port: env.parse_or("NYAH_WEB_PORT", Self::DEFAULT_PORT),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
