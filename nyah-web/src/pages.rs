use askama::Template;
use axum::http::{StatusCode, header};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use serde_json::Value;
use tracing::debug;

use nyah_config::{ConfigStore, Document, DocumentKind};

use crate::error::WebError;
use crate::state::WebState;

const KEYWORD_COLUMNS: &[(&str, &str)] = &[
    ("triggers", "Déclencheurs"),
    ("title", "Titre"),
    ("color", "Couleur"),
];
const ROLE_COLUMNS: &[(&str, &str)] = &[
    ("trigger", "Déclencheur"),
    ("role_name", "Rôle"),
    ("remove_trigger", "Retrait"),
];
const GRANT_COLUMNS: &[(&str, &str)] = &[
    ("name", "Commande"),
    ("role_name", "Rôle"),
    ("allowed_user_ids", "Utilisateurs autorisés"),
    ("gif_path", "GIF"),
];

#[derive(Template)]
#[template(path = "config_page.html", escape = "html")]
struct ConfigPageTemplate<'a> {
    title: &'a str,
    active: &'a str,
    endpoint: &'a str,
    key: &'a str,
    columns: Vec<&'a str>,
    rows: Vec<Vec<String>>,
    document: String,
}

pub(crate) async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/ui/keywords")])
}

pub(crate) async fn keywords(State(state): State<WebState>) -> Result<Html<String>, WebError> {
    render(
        &state.stores.keyword_responses,
        "Réponses par mots-clés",
        "keywords",
        KEYWORD_COLUMNS,
    )
}

pub(crate) async fn roles(State(state): State<WebState>) -> Result<Html<String>, WebError> {
    render(
        &state.stores.role_triggers,
        "Triggers de rôles",
        "roles",
        ROLE_COLUMNS,
    )
}

pub(crate) async fn grant(State(state): State<WebState>) -> Result<Html<String>, WebError> {
    render(
        &state.stores.grant_commands,
        "Commandes d'attribution",
        "grant",
        GRANT_COLUMNS,
    )
}

fn render<K: DocumentKind>(
    store: &ConfigStore<K>,
    title: &str,
    active: &str,
    columns: &[(&str, &str)],
) -> Result<Html<String>, WebError> {
    debug!(page = active, "rendering config page");
    let document = store.load();
    let endpoint = format!("/api/{active}");

    let page = ConfigPageTemplate {
        title,
        active,
        endpoint: &endpoint,
        key: K::KEY,
        columns: columns.iter().map(|(_, label)| *label).collect(),
        rows: table_rows(&document, K::KEY, columns),
        document: pretty(&document),
    };
    Ok(Html(page.render()?))
}

fn table_rows(document: &Document, key: &str, columns: &[(&str, &str)]) -> Vec<Vec<String>> {
    let Some(Value::Array(entries)) = document.get(key) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            columns
                .iter()
                .map(|(field, _)| cell(entry.get(*field)))
                .collect()
        })
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| cell(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

fn pretty(document: &Document) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| "{}".to_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use nyah_config::ConfigStores;

    use super::cell;
    use crate::router;
    use crate::state::WebState;

    async fn get(state: WebState, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router(state)
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, headers, String::from_utf8(bytes.to_vec()).expect("utf8"))
    }

    #[tokio::test]
    async fn root_redirects_to_keywords() {
        let dir = TempDir::new().expect("tempdir");
        let (status, headers, _) = get(WebState::new(ConfigStores::in_dir(dir.path())), "/").await;

        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[header::LOCATION], "/ui/keywords");
    }

    #[tokio::test]
    async fn roles_page_lists_entries_escaped() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join("role_triggers.json"),
            json!({"triggers": [{"trigger": "<miwa>", "role_name": "Fan"}]}).to_string(),
        )
        .expect("seed");

        let (status, _, html) = get(WebState::new(ConfigStores::in_dir(dir.path())), "/ui/roles").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Triggers de rôles"));
        assert!(html.contains("&lt;miwa&gt;"));
        assert!(!html.contains("<miwa>"));
        assert!(html.contains(r#"data-endpoint="/api/roles""#));
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let dir = TempDir::new().expect("tempdir");
        let state = WebState::new(ConfigStores::in_dir(dir.path()));

        let (status, headers, _) = get(state.clone(), "/static/admin.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().expect("header").starts_with("text/css"));

        let (status, _, script) = get(state, "/static/admin.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(script.contains("/api/reload"));
    }

    #[test]
    fn cells_flatten_lists() {
        assert_eq!(cell(Some(&json!([1, "deux"]))), "1, deux");
        assert_eq!(cell(Some(&json!(null))), "");
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some(&json!(true))), "true");
    }
}
