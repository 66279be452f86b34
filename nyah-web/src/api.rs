use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use nyah_config::{ConfigStore, Document, DocumentKind};

use crate::error::WebError;
use crate::state::WebState;

pub(crate) async fn get_keywords(State(state): State<WebState>) -> Json<Document> {
    Json(load_document(&state.stores.keyword_responses))
}

pub(crate) async fn save_keywords(
    State(state): State<WebState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, WebError> {
    save_document(&state.stores.keyword_responses, &payload)
}

pub(crate) async fn get_roles(State(state): State<WebState>) -> Json<Document> {
    Json(load_document(&state.stores.role_triggers))
}

pub(crate) async fn save_roles(
    State(state): State<WebState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, WebError> {
    save_document(&state.stores.role_triggers, &payload)
}

pub(crate) async fn get_grant(State(state): State<WebState>) -> Json<Document> {
    Json(load_document(&state.stores.grant_commands))
}

pub(crate) async fn save_grant(
    State(state): State<WebState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, WebError> {
    save_document(&state.stores.grant_commands, &payload)
}

/// Re-read every reloadable feature's document in the attached bot.
pub(crate) async fn reload(State(state): State<WebState>) -> Json<Value> {
    match &state.registry {
        Some(registry) => {
            let reloaded = registry.reload_all();
            info!(reloaded, "reload requested from admin panel");
            Json(json!({"ok": true, "reloaded": reloaded}))
        }
        None => Json(json!({
            "ok": false,
            "error": "Aucun bot n'est attaché à ce panneau"
        })),
    }
}

fn load_document<K: DocumentKind>(store: &ConfigStore<K>) -> Document {
    debug!(key = K::KEY, path = %store.path().display(), "document requested");
    store.load()
}

/// Replace the document with the payload's list. Anything else in the payload is dropped.
fn save_document<K: DocumentKind>(
    store: &ConfigStore<K>,
    payload: &Value,
) -> Result<Json<Value>, WebError> {
    let Some(Value::Array(entries)) = payload.get(K::KEY) else {
        warn!(key = K::KEY, "rejected document without a list");
        return Ok(Json(json!({
            "ok": false,
            "error": format!("'{}' doit être une liste", K::KEY)
        })));
    };

    let mut document = Document::new();
    document.insert(K::KEY.to_owned(), Value::Array(entries.clone()));
    store
        .save(&document)
        .map_err(|source| WebError::Save {
            key: K::KEY,
            source: source.into(),
        })?;

    info!(key = K::KEY, entries = entries.len(), path = %store.path().display(), "document saved");
    Ok(Json(json!({"ok": true})))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use nyah_config::ConfigStores;
    use nyah_core::FeatureRegistry;

    use crate::router;
    use crate::state::WebState;

    async fn call(state: WebState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn get_creates_and_returns_empty_document() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));

        let (status, body) = call(
            state,
            Request::get("/api/keywords").body(Body::empty()).expect("request"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"embeds": []}));
        assert!(dir.path().join("keyword_responses.json").exists());
    }

    #[tokio::test]
    async fn post_replaces_document_with_the_list_only() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));
        let triggers = json!([{"trigger": "miwa", "role_name": "Fan"}]);

        let (status, body) = call(
            state.clone(),
            post("/api/roles", json!({"triggers": triggers, "extra": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));

        let (_, stored) = call(
            state,
            Request::get("/api/roles").body(Body::empty()).expect("request"),
        )
        .await;
        assert_eq!(stored, json!({"triggers": triggers}));
    }

    #[tokio::test]
    async fn non_list_payload_is_rejected_and_file_untouched() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("role_triggers.json");
        fs::write(&path, r#"{"triggers": [{"trigger": "a", "role_name": "A"}]}"#).expect("seed");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));

        let (status, body) = call(state, post("/api/roles", json!({"triggers": "not-a-list"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": false, "error": "'triggers' doit être une liste"}));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            r#"{"triggers": [{"trigger": "a", "role_name": "A"}]}"#
        );
    }

    #[tokio::test]
    async fn missing_key_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));

        let (_, body) = call(state, post("/api/grant", json!({"embeds": []}))).await;

        assert_eq!(body, json!({"ok": false, "error": "'commands' doit être une liste"}));
    }

    #[tokio::test]
    async fn reload_without_registry_reports_failure() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));

        let (_, body) = call(state, post("/api/reload", json!({}))).await;

        assert_eq!(body["ok"], json!(false));
    }

    #[tokio::test]
    async fn reload_with_registry_reports_count() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()))
            .with_registry(Arc::new(FeatureRegistry::new()));

        let (_, body) = call(state, post("/api/reload", json!({}))).await;

        assert_eq!(body, json!({"ok": true, "reloaded": 0}));
    }

    #[tokio::test]
    async fn unwritable_store_is_a_server_error() {
        let dir = TempDir::new().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").expect("seed");
        let state = WebState::new(ConfigStores::in_dir(&blocker));

        let (status, body) = call(state, post("/api/keywords", json!({"embeds": []}))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], json!(false));
    }
}
