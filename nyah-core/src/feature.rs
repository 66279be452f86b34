use async_trait::async_trait;

use nyah_config::Env;

use crate::Error;
use crate::message::IncomingMessage;
use crate::platform::ChatPlatform;

/// One independent message behavior.
#[async_trait]
pub trait Feature: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-time initialization once the session is connected.
    fn setup(&self, env: &Env);

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error>;

    /// Features backed by an editable config document expose a reload hook.
    fn as_reloadable(&self) -> Option<&dyn Reloadable> {
        None
    }
}

pub trait Reloadable: Send + Sync {
    /// Re-read configuration and swap it in.
    fn reload(&self);
}
