//! Request routing dispatch module
//!
//! Maps URL patterns to handler capabilities and selects exactly one per
//! request. Patterns ending in `/` are subtree patterns covering every
//! path beneath them; all others match exactly. The route table is built
//! at startup and read-only afterwards, so dispatch needs no locking.

use crate::error::{HandlerError, RouterError};
use crate::handler::{Handler, HandlerFuture, RequestContext};
use crate::http;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Pattern-to-handler dispatch table
///
/// A `Router` is itself a [`Handler`], so one can be mounted inside
/// another like any other capability.
pub struct Router {
    exact: HashMap<String, Arc<dyn Handler>>,
    subtree: BTreeMap<String, Arc<dyn Handler>>,
}

/// What dispatch decided to do with a path
enum Resolution {
    Handler(Arc<dyn Handler>),
    Redirect(String),
    NotFound,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            subtree: BTreeMap::new(),
        }
    }

    /// Add a route entry
    ///
    /// Malformed patterns and duplicates of an already registered pattern
    /// are rejected here, never at dispatch time.
    pub fn register(
        &mut self,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), RouterError> {
        if pattern.is_empty() {
            return Err(RouterError::EmptyPattern);
        }
        if !pattern.starts_with('/') {
            return Err(RouterError::RelativePattern(pattern.to_string()));
        }

        if pattern.ends_with('/') {
            if self.subtree.contains_key(pattern) {
                return Err(RouterError::DuplicatePattern(pattern.to_string()));
            }
            self.subtree.insert(pattern.to_string(), handler);
        } else {
            if self.exact.contains_key(pattern) {
                return Err(RouterError::DuplicatePattern(pattern.to_string()));
            }
            self.exact.insert(pattern.to_string(), handler);
        }
        Ok(())
    }

    /// Select the best-matching entry and invoke its handler
    ///
    /// A miss is a normal terminal outcome: it surfaces as a 404 client
    /// error and is never logged as an operational failure.
    pub fn dispatch(&self, ctx: RequestContext) -> HandlerFuture {
        match self.resolve(&ctx.path) {
            Resolution::Handler(handler) => handler.handle(ctx),
            Resolution::Redirect(location) => {
                Box::pin(async move { Ok(http::redirect(&location)) })
            }
            Resolution::NotFound => Box::pin(async { Err(HandlerError::not_found()) }),
        }
    }

    /// Matching order: exact entry, then the trailing-slash redirect for a
    /// registered subtree, then the longest subtree prefix. The redirect
    /// check runs before prefix matching so a shorter subtree (such as
    /// `/`) cannot shadow the normalization.
    fn resolve(&self, path: &str) -> Resolution {
        if let Some(handler) = self.exact.get(path) {
            return Resolution::Handler(Arc::clone(handler));
        }

        let normalized = format!("{path}/");
        if self.subtree.contains_key(&normalized) {
            return Resolution::Redirect(normalized);
        }

        self.subtree
            .iter()
            .filter(|(pattern, _)| path.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map_or(Resolution::NotFound, |(_, handler)| {
                Resolution::Handler(Arc::clone(handler))
            })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Router {
    fn handle(&self, ctx: RequestContext) -> HandlerFuture {
        self.dispatch(ctx)
    }
}
