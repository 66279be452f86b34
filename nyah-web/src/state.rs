use std::sync::Arc;

use nyah_config::ConfigStores;
use nyah_core::FeatureRegistry;

#[derive(Clone, Debug)]
pub struct WebState {
    pub stores: ConfigStores,
    /// Present when the panel runs in the same process as the bot.
    pub registry: Option<Arc<FeatureRegistry>>,
}

impl WebState {
    pub fn new(stores: ConfigStores) -> Self {
        Self {
            stores,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: Arc<FeatureRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}
