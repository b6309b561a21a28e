//! Serves the browser form that talks to the Dream Service.

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub const INDEX_HTML: &str = include_str!("../static/index.html");
pub const DEFAULT_UI_PORT: u16 = 5173;

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// The form page, wired to post to `service_url`.
pub fn index_page(service_url: &str) -> String {
    let escaped = escape_js_string(service_url.trim_end_matches('/'));
    render(INDEX_HTML, &[("service_url", &escaped)])
}

/// Escape text for a single-quoted JS string literal inside a `<script>` block.
fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn ui_router(service_url: &str) -> Router {
    let page = index_page(service_url);
    Router::new().route("/", get(move || async move { Html(page) }))
}

pub async fn run(port: u16, service_url: &str) -> crate::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("UI on http://localhost:{} (dream service: {})", port, service_url);
    axum::serve(listener, ui_router(service_url)).await?;
    Ok(())
}
