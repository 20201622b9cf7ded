// src/web/mod.rs
// Static client assets compiled into the binary

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const APP_JS: &str = include_str!("../../assets/app.js");
const STYLE_CSS: &str = include_str!("../../assets/style.css");

/// Get MIME type from file extension
fn mime_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn asset(path: &'static str, body: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(mime_type(path))),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
        body,
    )
        .into_response()
}

pub fn web_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_redirect))
        .route("/index.html", get(|| async { asset("index.html", INDEX_HTML) }))
        .route("/app.js", get(|| async { asset("app.js", APP_JS) }))
        .route("/style.css", get(|| async { asset("style.css", STYLE_CSS) }))
}

/// GET / sends the browser to the page itself
async fn root_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/index.html")])
}
