//! HTTP response building module
//!
//! Builders for the responses the dispatch core produces, decoupled from
//! any business logic. Status-only responses carry exactly the canonical
//! reason phrase as their body and never any internal detail.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Build a response whose body is the standard status text
pub fn status_response(status: StatusCode) -> Response<Full<Bytes>> {
    let text = status.canonical_reason().unwrap_or("Unknown Status");
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(text.as_bytes()))))
}

/// Build a 301 redirect to the given location
pub fn redirect(location: &str) -> Response<Full<Bytes>> {
    redirect_with_status(location, StatusCode::MOVED_PERMANENTLY)
}

/// Build a 303 redirect, for answering a successful POST
pub fn see_other(location: &str) -> Response<Full<Bytes>> {
    redirect_with_status(location, StatusCode::SEE_OTHER)
}

/// Build a redirect response with the given status code
pub fn redirect_with_status(location: &str, status: StatusCode) -> Response<Full<Bytes>> {
    let text = status.canonical_reason().unwrap_or("Redirect");
    Response::builder()
        .status(status)
        .header("Location", location)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|_| status_response(StatusCode::INTERNAL_SERVER_ERROR))
}

/// Build a 200 HTML response
pub fn html(content: String) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Build a 200 response for a served file
pub fn file_response(data: Vec<u8>, content_type: &'static str) -> Response<Full<Bytes>> {
    let content_length = data.len();
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}
