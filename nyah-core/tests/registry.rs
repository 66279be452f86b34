use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use nyah_config::Env;
use nyah_core::{ChatPlatform, Error, Feature, FeatureRegistry, IncomingMessage, Reloadable};
use nyah_test_utils::{MessageBuilder, MockPlatform};

#[derive(Default)]
struct Counters {
    setups: AtomicUsize,
    messages: AtomicUsize,
    reloads: AtomicUsize,
}

/// Replies with its label so the dispatch order is visible in the recorded calls.
struct Echo {
    label: &'static str,
    fail: bool,
    reloadable: bool,
    counters: Arc<Counters>,
}

impl Echo {
    fn new(label: &'static str, counters: &Arc<Counters>) -> Self {
        Self {
            label,
            fail: false,
            reloadable: false,
            counters: Arc::clone(counters),
        }
    }
}

#[async_trait]
impl Feature for Echo {
    fn name(&self) -> &'static str {
        self.label
    }

    fn setup(&self, _env: &Env) {
        self.counters.setups.fetch_add(1, Ordering::SeqCst);
    }

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error> {
        self.counters.messages.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("{} exploded", self.label);
        }
        platform.send_text(message.channel_id, self.label).await
    }

    fn as_reloadable(&self) -> Option<&dyn Reloadable> {
        if self.reloadable { Some(self) } else { None }
    }
}

impl Reloadable for Echo {
    fn reload(&self) {
        self.counters.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn dispatch_runs_features_in_registration_order() {
    let counters = Arc::new(Counters::default());
    let registry = FeatureRegistry::new()
        .with(Echo::new("first", &counters))
        .with(Echo::new("second", &counters))
        .with(Echo::new("third", &counters));
    let platform = MockPlatform::new();

    registry
        .dispatch(&platform, &MessageBuilder::new("hello").build())
        .await;

    assert_eq!(platform.texts(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn failing_feature_does_not_stop_the_rest() {
    let counters = Arc::new(Counters::default());
    let mut broken = Echo::new("broken", &counters);
    broken.fail = true;
    let registry = FeatureRegistry::new()
        .with(Echo::new("before", &counters))
        .with(broken)
        .with(Echo::new("after", &counters));
    let platform = MockPlatform::new();

    registry
        .dispatch(&platform, &MessageBuilder::new("hello").build())
        .await;

    assert_eq!(platform.texts(), vec!["before", "after"]);
    assert_eq!(counters.messages.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn bots_and_direct_messages_are_ignored() {
    let counters = Arc::new(Counters::default());
    let registry = FeatureRegistry::new().with(Echo::new("only", &counters));
    let platform = MockPlatform::new();

    registry
        .dispatch(&platform, &MessageBuilder::new("beep").from_bot().build())
        .await;
    registry
        .dispatch(&platform, &MessageBuilder::new("psst").direct().build())
        .await;

    assert!(platform.calls().is_empty());
    assert_eq!(counters.messages.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registering_twice_dispatches_twice() {
    let counters = Arc::new(Counters::default());
    let shared: Arc<dyn Feature> = Arc::new(Echo::new("twice", &counters));
    let mut registry = FeatureRegistry::new();
    registry.register(Arc::clone(&shared));
    registry.register(shared);

    registry
        .dispatch(&MockPlatform::new(), &MessageBuilder::new("x").build())
        .await;

    assert_eq!(counters.messages.load(Ordering::SeqCst), 2);
}

#[test]
fn setup_and_reload_only_touch_capable_features() {
    let counters = Arc::new(Counters::default());
    let mut reloadable = Echo::new("reloadable", &counters);
    reloadable.reloadable = true;
    let registry = FeatureRegistry::new()
        .with(Echo::new("static", &counters))
        .with(reloadable);

    registry.setup_all(&Env::default());
    let reloaded = registry.reload_all();

    assert_eq!(counters.setups.load(Ordering::SeqCst), 2);
    assert_eq!(reloaded, 1);
    assert_eq!(counters.reloads.load(Ordering::SeqCst), 1);
    assert_eq!(registry.names(), vec!["static", "reloadable"]);
}
