use std::sync::Arc;

use tracing::info;

use nyah_config::ConfigStores;
use nyah_core::WebConfig;
use nyah_web::WebState;

/// Bot and admin panel on one runtime, sharing the feature registry for reloads.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = nyah_bot::bootstrap()?;
    let registry = Arc::new(nyah_commands::default_registry(&env));

    let web_config = WebConfig::from_env(&env);
    let web_state =
        WebState::new(ConfigStores::from_env(&env)).with_registry(Arc::clone(&registry));

    let bot = nyah_bot::run_bot(&env, registry);
    let web = nyah_web::serve(&web_config, web_state);

    tokio::select! {
        result = async { tokio::try_join!(bot, web).map(|_| ()) } => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            Ok(())
        }
    }
}
