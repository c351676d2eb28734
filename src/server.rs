//! @ai:module:intent Serve rendered documents over HTTP
//! @ai:module:layer presentation
//! @ai:module:public_api router, serve, normalize_addr
//! @ai:module:depends_on record, error
//! @ai:module:thread_safe true
//!
//! The server owns an `Arc<DocIndex>` snapshot that is fully built before
//! the listener binds. Handlers only read it, so no locking is involved.
//!
//! Routes:
//! - `GET /` lists every document path as a link
//! - `GET /doc?path=<path>` renders one document, or 404 when the path is unknown

use crate::error::Result;
use crate::record::{DocIndex, Document};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

const STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        pre {
            background-color: #f4f4f4;
            border: 1px solid #ddd;
            border-radius: 4px;
            padding: 10px;
            overflow-x: auto;
        }
        code {
            font-family: 'Courier New', Courier, monospace;
        }"#;

const HIGHLIGHT_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/styles/github-dark.min.css";
const HIGHLIGHT_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/highlight.min.js";

/// Query string of the document viewer.
#[derive(Debug, Deserialize)]
pub struct DocQuery {
    path: Option<String>,
}

/// @ai:intent Build the router over an immutable document snapshot
/// @ai:effects pure
pub fn router(index: Arc<DocIndex>) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/doc", get(doc_handler))
        .with_state(index)
}

/// @ai:intent Bind the address and serve the index until the process stops
/// @ai:pre index is complete; it is never modified after this call
/// @ai:effects network
pub async fn serve(addr: &str, index: DocIndex) -> Result<()> {
    let addr = normalize_addr(addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    if index.is_empty() {
        tracing::warn!("No documentable files found; the listing will be empty");
    }
    tracing::info!("Starting HTTP server on {} ({} documents)", addr, index.len());
    axum::serve(listener, router(Arc::new(index))).await?;
    Ok(())
}

/// @ai:intent Accept the short `:port` form by binding on all interfaces
/// @ai:example (":6060") -> "0.0.0.0:6060"
/// @ai:example ("127.0.0.1:8080") -> "127.0.0.1:8080"
/// @ai:effects pure
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}

async fn list_handler(State(index): State<Arc<DocIndex>>) -> Html<String> {
    Html(render_list_page(&index))
}

async fn doc_handler(
    State(index): State<Arc<DocIndex>>,
    Query(query): Query<DocQuery>,
) -> Response {
    match query.path.as_deref().and_then(|path| index.get(path)) {
        Some(document) => Html(render_doc_page(document)).into_response(),
        None => (StatusCode::NOT_FOUND, "Document not found").into_response(),
    }
}

/// @ai:intent Render the listing page linking every document
/// @ai:effects pure
fn render_list_page(index: &DocIndex) -> String {
    let mut items = String::new();

    for document in index.iter() {
        let href: String = url::form_urlencoded::byte_serialize(document.path.as_bytes()).collect();
        writeln!(
            items,
            r#"        <li><a href="/doc?path={}">{}</a></li>"#,
            escape_html(&href),
            escape_html(&document.path)
        )
        .unwrap();
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Document List</title>
    <style>{STYLE}
    </style>
</head>
<body>
    <h1>Document List</h1>
    <ul>
{items}    </ul>
</body>
</html>
"#
    )
}

/// @ai:intent Render one document as HTML with highlighted code blocks
/// @ai:effects pure
fn render_doc_page(document: &Document) -> String {
    let body = markdown_to_html(&document.content);
    let title = escape_html(&document.path);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" href="{HIGHLIGHT_CSS}">
    <script src="{HIGHLIGHT_JS}"></script>
    <style>{STYLE}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div id="content">
{body}    </div>
    <script>hljs.highlightAll();</script>
</body>
</html>
"#
    )
}

/// @ai:intent Convert Markdown to HTML with GitHub-flavored extensions
/// @ai:effects pure
fn markdown_to_html(markdown: &str) -> String {
    let mut options = comrak::Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;

    comrak::markdown_to_html(markdown, &options)
}

/// Escape `& < > " '` for element text and attribute values.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> Arc<DocIndex> {
        let index: DocIndex = [
            Document {
                path: "pkg/two_sum.go".to_string(),
                content: "# Notes\n\n**Author**: Ana\n\n## Code\n```go\npackage main\n```\n"
                    .to_string(),
            },
            Document {
                path: "a&b <odd>.go".to_string(),
                content: "# Notes\n".to_string(),
            },
        ]
        .into_iter()
        .collect();
        Arc::new(index)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_links_every_document() {
        let Html(page) = list_handler(State(sample_index())).await;

        assert!(page.contains(r#"<a href="/doc?path=pkg%2Ftwo_sum.go">pkg/two_sum.go</a>"#));
        assert!(page.contains("a&amp;b &lt;odd&gt;.go"));
    }

    #[tokio::test]
    async fn test_known_document_is_rendered() {
        let query = DocQuery {
            path: Some("pkg/two_sum.go".to_string()),
        };
        let response = doc_handler(State(sample_index()), Query(query)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("<h1>Notes</h1>"));
        assert!(page.contains("<strong>Author</strong>: Ana"));
        assert!(page.contains(r#"<code class="language-go">package main"#));
        assert!(page.contains("hljs.highlightAll()"));
    }

    #[tokio::test]
    async fn test_unknown_document_is_not_found() {
        let query = DocQuery {
            path: Some("missing.go".to_string()),
        };
        let response = doc_handler(State(sample_index()), Query(query)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Document not found");
    }

    #[tokio::test]
    async fn test_missing_path_parameter_is_not_found() {
        let response = doc_handler(State(sample_index()), Query(DocQuery { path: None })).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_normalize_addr() {
        assert_eq!(normalize_addr(":6060"), "0.0.0.0:6060");
        assert_eq!(normalize_addr("127.0.0.1:8080"), "127.0.0.1:8080");
    }
}
