//! Dependency container module
//!
//! The immutable bundle of shared services built once in `main` before the
//! listener starts: the logger sinks and the store handle. It is shared as
//! `Arc<Container>` across every in-flight request and never mutated after
//! construction, so concurrent dispatches read it without locking.
//!
//! The error translator lives here because it needs the error sink: every
//! failure that reaches a handler's boundary is turned into a response by
//! [`Container::translate`], never by ad hoc code near the socket.

use crate::error::HandlerError;
use crate::http;
use crate::logger::Logger;
use crate::store::Store;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Immutable bundle of shared services
pub struct Container {
    pub logger: Arc<Logger>,
    pub store: Arc<dyn Store>,
}

impl Container {
    #[must_use]
    pub fn new(logger: Arc<Logger>, store: Arc<dyn Store>) -> Self {
        Self { logger, store }
    }

    /// Turn a handler failure into the response to write
    ///
    /// Server errors pass through [`Self::server_error`], client errors
    /// through [`Self::client_error`]; there is no third path.
    pub fn translate(&self, err: &HandlerError) -> Response<Full<Bytes>> {
        match err {
            HandlerError::Client { status } => self.client_error(*status),
            HandlerError::Server { cause, origin } => self.server_error(cause, origin),
        }
    }

    /// Log an internal failure and answer a generic 500
    ///
    /// Exactly one line goes to the error sink, carrying the cause and the
    /// call site that raised it. The response body is only the standard
    /// status text; internal detail never leaks to the client.
    pub fn server_error(
        &self,
        cause: &dyn fmt::Display,
        origin: &Location<'_>,
    ) -> Response<Full<Bytes>> {
        self.logger.error(&format!("{cause} (at {origin})"));
        http::status_response(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Answer a client error with its standard status text
    ///
    /// Client errors are not operational failures; nothing is logged.
    pub fn client_error(&self, status: StatusCode) -> Response<Full<Bytes>> {
        http::status_response(status)
    }

    /// Convenience alias for `client_error(404)`
    pub fn not_found(&self) -> Response<Full<Bytes>> {
        self.client_error(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use http_body_util::BodyExt;

    struct Sinks {
        app: Container,
        error_path: std::path::PathBuf,
        _dir: tempfile::TempDir,
    }

    fn container_with_sinks() -> Sinks {
        let dir = tempfile::tempdir().unwrap();
        let info_path = dir.path().join("info.log");
        let error_path = dir.path().join("error.log");
        let logger = Logger::open(info_path.to_str(), error_path.to_str()).unwrap();
        let app = Container::new(Arc::new(logger), Arc::new(MemStore::new()));
        Sinks {
            app,
            error_path,
            _dir: dir,
        }
    }

    fn error_lines(path: &std::path::Path) -> usize {
        std::fs::read_to_string(path)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_server_error_logs_one_line_and_hides_detail() {
        let sinks = container_with_sinks();
        let err = HandlerError::server(std::io::Error::other("store connection lost"));

        let resp = sinks.app.translate(&err);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(resp).await, "Internal Server Error");

        assert_eq!(error_lines(&sinks.error_path), 1);
        let line = std::fs::read_to_string(&sinks.error_path).unwrap();
        assert!(line.contains("store connection lost"));
        assert!(line.contains("container.rs"));
    }

    #[tokio::test]
    async fn test_client_error_has_status_text_body_and_no_log() {
        let sinks = container_with_sinks();

        let resp = sinks.app.client_error(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_text(resp).await, "Method Not Allowed");

        assert_eq!(error_lines(&sinks.error_path), 0);
    }

    #[tokio::test]
    async fn test_not_found_alias() {
        let sinks = container_with_sinks();

        let resp = sinks.app.not_found();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, "Not Found");
        assert_eq!(error_lines(&sinks.error_path), 0);
    }

    #[tokio::test]
    async fn test_translate_routes_client_errors_silently() {
        let sinks = container_with_sinks();
        let err = HandlerError::client(StatusCode::BAD_REQUEST);

        let resp = sinks.app.translate(&err);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_lines(&sinks.error_path), 0);
    }
}
