use axum::{http::header, response::Html, response::IntoResponse};

use crate::ui::shell;

/// GET /
pub async fn index_handler() -> Html<String> {
    Html(shell::render_page())
}

/// GET /assets/console.js
pub async fn console_js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        shell::CONSOLE_JS,
    )
}
