//! Request handler module
//!
//! Defines the handler capability every unit of request-handling logic
//! satisfies, the adapter that lets a bare async function participate in
//! dispatch, and the per-request context handlers read from. The router
//! and the static file server are handlers themselves.

pub mod pages;
pub mod router;
pub mod static_files;

pub use router::Router;
pub use static_files::StaticFiles;

use crate::error::HandlerError;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{HeaderMap, Method, Request, Response};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Outcome of handling one request
pub type HandlerResult = Result<Response<Full<Bytes>>, HandlerError>;

/// Boxed future produced by a handler invocation
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// Anything that can answer a request
///
/// Implementors must be shareable across concurrent dispatches; the route
/// table hands out `Arc<dyn Handler>` and never locks.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: RequestContext) -> HandlerFuture;
}

/// Adapter wrapping a bare async function as a [`Handler`]
///
/// Invoking the capability through the adapter is identical to calling the
/// function directly; the adapter only boxes the returned future.
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async function or closure so it can be registered like any
/// stateful handler object
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    HandlerFn { f }
}

impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn handle(&self, ctx: RequestContext) -> HandlerFuture {
        Box::pin((self.f)(ctx))
    }
}

/// Read-only snapshot of one incoming request
///
/// Built once per dispatch and dropped when the response is written; no
/// handler keeps it beyond its own invocation.
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RequestContext {
    /// Build a context from a hyper request, collecting the body
    pub async fn from_request(req: Request<Incoming>) -> Result<Self, HandlerError> {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(HandlerError::server)?
            .to_bytes();
        let query = parts.uri.query().map_or_else(HashMap::new, parse_query);
        Ok(Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query,
            headers: parts.headers,
            body,
        })
    }

    /// Build a bodyless context from a method and a target such as
    /// `/snippet/view?id=1`
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, HashMap::new()),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

/// Parse a query string into key/value pairs
///
/// Later duplicates win; empty keys and pairs without a value are dropped.
fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;
    use hyper::StatusCode;

    async fn greet(_ctx: RequestContext) -> HandlerResult {
        Ok(http::html("hello".to_string()))
    }

    #[tokio::test]
    async fn test_adapter_matches_direct_call() {
        let direct = greet(RequestContext::new(Method::GET, "/")).await.unwrap();

        let adapted = handler_fn(greet);
        let through_adapter = adapted
            .handle(RequestContext::new(Method::GET, "/"))
            .await
            .unwrap();

        assert_eq!(direct.status(), through_adapter.status());
        assert_eq!(
            direct.headers()["Content-Length"],
            through_adapter.headers()["Content-Length"]
        );
    }

    #[tokio::test]
    async fn test_closure_adapter() {
        let handler = handler_fn(|ctx: RequestContext| async move {
            if ctx.method == Method::GET {
                Ok(http::html("ok".to_string()))
            } else {
                Err(HandlerError::client(StatusCode::METHOD_NOT_ALLOWED))
            }
        });

        let resp = handler
            .handle(RequestContext::new(Method::GET, "/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let err = handler
            .handle(RequestContext::new(Method::POST, "/"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, HandlerError::Client { status } if status == StatusCode::METHOD_NOT_ALLOWED)
        );
    }

    #[test]
    fn test_parse_query_pairs() {
        let query = parse_query("id=7&title=old%20pond");
        assert_eq!(query["id"], "7");
        assert_eq!(query["title"], "old%20pond");
    }

    #[test]
    fn test_parse_query_drops_malformed_pairs() {
        let query = parse_query("id=1&&novalue&=orphan");
        assert_eq!(query.len(), 1);
        assert_eq!(query["id"], "1");
    }

    #[test]
    fn test_context_from_target() {
        let ctx = RequestContext::new(Method::GET, "/snippet/view?id=3");
        assert_eq!(ctx.path, "/snippet/view");
        assert_eq!(ctx.query["id"], "3");

        let ctx = RequestContext::new(Method::GET, "/plain");
        assert_eq!(ctx.path, "/plain");
        assert!(ctx.query.is_empty());
    }
}
