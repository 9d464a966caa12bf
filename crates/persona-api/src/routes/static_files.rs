//! 프레젠테이션 페이지.
//!
//! HTML/JS/CSS는 바이너리에 포함되어 배포됩니다.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /script.js
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// GET /style.css
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

/// 정적 페이지 라우터 생성.
pub fn static_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/script.js", get(script))
        .route("/style.css", get(stylesheet))
}
