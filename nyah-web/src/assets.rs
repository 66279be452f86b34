use axum::http::header;
use axum::response::IntoResponse;

const ADMIN_CSS: &str = include_str!("../static/admin.css");
const ADMIN_JS: &str = include_str!("../static/admin.js");

pub(crate) async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], ADMIN_CSS)
}

pub(crate) async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ADMIN_JS,
    )
}
