//! Application page handlers
//!
//! Each handler here is produced by a factory taking the dependency
//! container and returning a capability that has captured it. The factory
//! runs exactly once per route at startup; afterwards the bound handler is
//! a pure function of the container and the incoming request, so the pages
//! need no global lookups and no knowledge of how the container was built.

use crate::container::Container;
use crate::error::HandlerError;
use crate::handler::{handler_fn, Handler, RequestContext};
use crate::http;
use crate::store::{StoreError, SNIPPET_GET, SNIPPET_INSERT, SNIPPET_LATEST};
use hyper::{Method, StatusCode};
use std::sync::Arc;

/// How many snippets the landing page lists
const HOME_PAGE_LIMIT: &str = "10";

/// Landing page: the latest snippets
pub fn home(app: Arc<Container>) -> impl Handler {
    handler_fn(move |_ctx: RequestContext| {
        let app = Arc::clone(&app);
        async move {
            let rows = app
                .store
                .query(SNIPPET_LATEST, &[HOME_PAGE_LIMIT])
                .map_err(HandlerError::server)?;

            let mut page = String::from("<h1>Latest snippets</h1>\n");
            if rows.is_empty() {
                page.push_str("<p>There's nothing to see here... yet!</p>\n");
            } else {
                page.push_str("<ul>\n");
                for row in &rows {
                    let (id, title) = (&row[0], &row[1]);
                    page.push_str(&format!(
                        "<li><a href=\"/snippet/view?id={id}\">{title}</a></li>\n"
                    ));
                }
                page.push_str("</ul>\n");
            }
            Ok(http::html(page))
        }
    })
}

/// Show a single snippet, addressed by the `id` query parameter
pub fn snippet_view(app: Arc<Container>) -> impl Handler {
    handler_fn(move |ctx: RequestContext| {
        let app = Arc::clone(&app);
        async move {
            let Some(id) = ctx.query.get("id").and_then(|v| v.parse::<u64>().ok()) else {
                return Err(HandlerError::client(StatusCode::BAD_REQUEST));
            };

            let rows = match app.store.query(SNIPPET_GET, &[&id.to_string()]) {
                Ok(rows) => rows,
                Err(StoreError::NoRows) => return Err(HandlerError::not_found()),
                Err(err) => return Err(HandlerError::server(err)),
            };

            let row = &rows[0];
            let page = format!(
                "<h1>{title}</h1>\n<pre>{content}</pre>\n",
                title = row[1],
                content = row[2],
            );
            Ok(http::html(page))
        }
    })
}

/// Create a snippet from the `title` and `content` parameters
///
/// POST only: any other method is answered with 405 before anything else
/// runs.
pub fn snippet_create(app: Arc<Container>) -> impl Handler {
    handler_fn(move |ctx: RequestContext| {
        let app = Arc::clone(&app);
        async move {
            if ctx.method != Method::POST {
                return Err(HandlerError::client(StatusCode::METHOD_NOT_ALLOWED));
            }

            let (Some(title), Some(content)) = (ctx.query.get("title"), ctx.query.get("content"))
            else {
                return Err(HandlerError::client(StatusCode::BAD_REQUEST));
            };

            let id = app
                .store
                .execute(SNIPPET_INSERT, &[title, content])
                .map_err(HandlerError::server)?;

            Ok(http::see_other(&format!("/snippet/view?id={id}")))
        }
    })
}
