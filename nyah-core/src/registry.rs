use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use nyah_config::Env;

use crate::feature::Feature;
use crate::message::IncomingMessage;
use crate::platform::ChatPlatform;

/// Ordered list of message features, built once at startup and shared by reference.
#[derive(Default)]
pub struct FeatureRegistry {
    features: Vec<Arc<dyn Feature>>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends; registering the same feature twice dispatches to it twice.
    pub fn register(&mut self, feature: Arc<dyn Feature>) {
        debug!(feature = feature.name(), "feature registered");
        self.features.push(feature);
    }

    pub fn with(mut self, feature: impl Feature + 'static) -> Self {
        self.register(Arc::new(feature));
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.features.iter().map(|feature| feature.name()).collect()
    }

    pub fn setup_all(&self, env: &Env) {
        for feature in &self.features {
            feature.setup(env);
        }
        info!(features = ?self.names(), "features set up");
    }

    /// Reload every feature that supports it; returns how many did.
    pub fn reload_all(&self) -> usize {
        let mut reloaded = 0;
        for feature in &self.features {
            if let Some(reloadable) = feature.as_reloadable() {
                reloadable.reload();
                reloaded += 1;
            }
        }
        info!(reloaded, "feature configuration reloaded");
        reloaded
    }

    /// Run every feature on the message, in registration order, one at a time.
    ///
    /// Bot and direct messages are ignored. A failing feature is logged and the remaining
    /// features still run.
    pub async fn dispatch(&self, platform: &dyn ChatPlatform, message: &IncomingMessage) {
        if message.author_is_bot || message.guild_id.is_none() {
            return;
        }

        for feature in &self.features {
            if let Err(source) = feature.on_message(platform, message).await {
                error!(
                    ?source,
                    feature = feature.name(),
                    message_id = message.id.get(),
                    "feature failed while handling message"
                );
            }
        }
    }
}

impl fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("features", &self.names())
            .finish()
    }
}
