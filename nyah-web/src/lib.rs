//! Local admin panel for the bot's JSON configuration documents.
//!
//! Pages render the current documents with an in-browser JSON editor; the `/api` routes read
//! and replace whole documents. Saving never reloads the bot on its own: the editor calls
//! `POST /api/reload` explicitly.

mod api;
mod assets;
mod error;
mod pages;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use nyah_core::WebConfig;

pub use error::WebError;
pub use state::WebState;

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/ui/keywords", get(pages::keywords))
        .route("/ui/roles", get(pages::roles))
        .route("/ui/grant", get(pages::grant))
        .route("/api/keywords", get(api::get_keywords).post(api::save_keywords))
        .route("/api/roles", get(api::get_roles).post(api::save_roles))
        .route("/api/grant", get(api::get_grant).post(api::save_grant))
        .route("/api/reload", post(api::reload))
        .route("/static/admin.css", get(assets::stylesheet))
        .route("/static/admin.js", get(assets::script))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the task is cancelled or the listener fails.
pub async fn serve(config: &WebConfig, state: WebState) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(url = %format!("http://{address}"), "admin panel listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
