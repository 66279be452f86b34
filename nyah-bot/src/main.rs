use std::sync::Arc;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = nyah_bot::bootstrap()?;
    let registry = Arc::new(nyah_commands::default_registry(&env));

    tokio::select! {
        result = nyah_bot::run_bot(&env, registry) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            Ok(())
        }
    }
}
