use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum WebError {
    /// The document could not be written; the file on disk is unchanged or partial.
    #[error("failed to save '{key}' document")]
    Save {
        key: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Render(#[from] askama::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Save { key, source } => {
                error!(?source, key, "config save failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"ok": false, "error": format!("Échec de l'enregistrement de '{key}'")})),
                )
                    .into_response()
            }
            Self::Render(source) => {
                error!(?source, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur de rendu de la page").into_response()
            }
        }
    }
}
