//! HTML document that boots the WASM client for every page route.
//!
//! The server never renders page content itself; once the gate lets a page
//! request through, the client decides what to show from its own auth check.

use axum::http::header;
use axum::response::{Html, IntoResponse};

const CLIENT_JS: &str = "/pkg/metro_client.js";

pub(crate) fn shell_document() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8"/>
        <meta name="viewport" content="width=device-width, initial-scale=1"/>
        <title>Metro Operations</title>
        <link rel="icon" href="/favicon.ico"/>
        <script type="module">import init from "{CLIENT_JS}"; init();</script>
    </head>
    <body></body>
</html>
"#
    )
}

/// Fallback for any page path the gate allowed through.
pub async fn page_shell() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-store")], Html(shell_document()))
}
