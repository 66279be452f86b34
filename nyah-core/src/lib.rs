pub mod config;
pub mod feature;
pub mod message;
pub mod platform;
pub mod registry;
pub mod snapshot;

use std::sync::Arc;

pub use config::{BotConfig, WebConfig};
pub use feature::{Feature, Reloadable};
pub use message::IncomingMessage;
pub use platform::{BotStanding, ChatPlatform, MemberInfo, RoleInfo};
pub use registry::FeatureRegistry;
pub use snapshot::Snapshot;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub registry: Arc<FeatureRegistry>,
    pub config: BotConfig,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
