//! Connection handling module
//!
//! One tokio task per accepted connection. The service closure builds the
//! per-request context, dispatches through the router, and funnels any
//! handler failure through the container's translator before the response
//! is written. A dropped connection simply ends the task; hyper stops
//! delivering the response, in-flight handler work is not interrupted
//! here.

use crate::container::Container;
use crate::handler::{RequestContext, Router};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;

/// Handle a single connection in a spawned task
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    app: Arc<Container>,
    router: Arc<Router>,
) {
    let conn_logger = Arc::clone(&app.logger);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let app = Arc::clone(&app);
                let router = Arc::clone(&router);
                async move { Ok::<_, Infallible>(serve_request(req, &app, &router).await) }
            }),
        );

        if let Err(err) = conn.await {
            conn_logger.error(&format!("Failed to serve connection from {peer_addr}: {err}"));
        }
    });
}

/// Dispatch one request and translate any failure into a response
async fn serve_request(
    req: Request<Incoming>,
    app: &Arc<Container>,
    router: &Arc<Router>,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match RequestContext::from_request(req).await {
        Ok(ctx) => match router.dispatch(ctx).await {
            Ok(response) => response,
            Err(err) => app.translate(&err),
        },
        Err(err) => app.translate(&err),
    };

    app.logger
        .info(&format!("{method} {path} {}", response.status().as_u16()));
    response
}
