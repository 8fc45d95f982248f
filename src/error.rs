//! Error classification for request handling
//!
//! Two kinds of failure cross a handler's boundary: the request itself is
//! invalid (client error) or something unexpected broke inside the server
//! (server error). Both are plain values handed to the container's
//! translator, never written to the response by the handler itself.

use hyper::StatusCode;
use std::panic::Location;
use thiserror::Error;

/// Boxed error cause carried by server errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure produced while handling one request
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request is invalid; terminal at the detecting handler, not logged
    #[error("{status}")]
    Client {
        /// The 4xx status to answer with
        status: StatusCode,
    },

    /// An unexpected internal failure, logged with its origin before a
    /// generic 500 is sent
    #[error("{cause}")]
    Server {
        /// The underlying failure
        #[source]
        cause: BoxError,
        /// Where the failure was raised
        origin: &'static Location<'static>,
    },
}

impl HandlerError {
    /// Classify the request as invalid with the given status
    #[must_use]
    pub const fn client(status: StatusCode) -> Self {
        Self::Client { status }
    }

    /// Shorthand for a 404 client error
    #[must_use]
    pub const fn not_found() -> Self {
        Self::Client {
            status: StatusCode::NOT_FOUND,
        }
    }

    /// Wrap an internal failure, capturing the call site that raised it
    #[track_caller]
    pub fn server(cause: impl Into<BoxError>) -> Self {
        Self::Server {
            cause: cause.into(),
            origin: Location::caller(),
        }
    }
}

/// Rejected route registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("route pattern is empty")]
    EmptyPattern,

    #[error("route pattern {0:?} does not start with '/'")]
    RelativePattern(String),

    #[error("route pattern {0:?} is already registered")]
    DuplicatePattern(String),
}
