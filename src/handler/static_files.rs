//! Static file serving module
//!
//! A prefix-stripping handler that forwards matched requests to the
//! filesystem. Registered under a subtree pattern like any other
//! capability; the router does not treat it specially.

use crate::error::HandlerError;
use crate::handler::{Handler, HandlerFuture, RequestContext};
use crate::http::{mime, response};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serves files beneath `root` for paths under `prefix`
pub struct StaticFiles {
    prefix: String,
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            root: root.into(),
        }
    }
}

impl Handler for StaticFiles {
    fn handle(&self, ctx: RequestContext) -> HandlerFuture {
        let prefix = self.prefix.clone();
        let root = self.root.clone();
        Box::pin(async move { serve(&prefix, &root, &ctx.path).await })
    }
}

async fn serve(
    prefix: &str,
    root: &Path,
    path: &str,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    let relative = path
        .strip_prefix(prefix)
        .unwrap_or(path)
        .trim_start_matches('/');

    // An unreadable root is a deployment problem, not a bad request
    let root_canonical = fs::canonicalize(root).await.map_err(HandlerError::server)?;

    // Canonicalize before the containment check so `..` segments and
    // symlinks cannot escape the root
    let Ok(file_path) = fs::canonicalize(root.join(relative)).await else {
        return Err(HandlerError::not_found());
    };
    if !file_path.starts_with(&root_canonical) {
        return Err(HandlerError::not_found());
    }

    let metadata = fs::metadata(&file_path).await.map_err(HandlerError::server)?;
    if metadata.is_dir() {
        return Err(HandlerError::not_found());
    }

    let content = fs::read(&file_path).await.map_err(HandlerError::server)?;
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Ok(response::file_response(content, content_type))
}
