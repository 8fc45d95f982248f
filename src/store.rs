//! Store abstraction
//!
//! The dispatch core only ever talks to persistence through the [`Store`]
//! trait: named statements in, rows out. Schema, driver and transaction
//! mechanics live entirely behind the trait. [`MemStore`] is the bundled
//! in-memory implementation used by the binary and the tests; anything
//! mutable inside a store guards itself, callers share it read-only.

use std::sync::Mutex;
use thiserror::Error;

/// One result row: a flat list of column values
pub type Row = Vec<String>;

/// Failure reported by a store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The query ran but matched nothing
    #[error("no rows matched the query")]
    NoRows,

    /// The statement name is not one this store understands
    #[error("unknown statement {0:?}")]
    UnknownStatement(String),

    /// Wrong parameter count or an unparsable parameter
    #[error("bad parameters for statement {0:?}")]
    BadParameters(String),
}

/// Opaque persistence interface
pub trait Store: Send + Sync {
    /// Run a read statement, returning the matched rows
    fn query(&self, statement: &str, params: &[&str]) -> Result<Vec<Row>, StoreError>;

    /// Run a write statement, returning the id of the affected record
    fn execute(&self, statement: &str, params: &[&str]) -> Result<u64, StoreError>;
}

/// Statement names understood by [`MemStore`]
pub const SNIPPET_GET: &str = "snippet.get";
pub const SNIPPET_LATEST: &str = "snippet.latest";
pub const SNIPPET_INSERT: &str = "snippet.insert";

struct SnippetRecord {
    id: u64,
    title: String,
    content: String,
}

/// In-memory snippet store
pub struct MemStore {
    inner: Mutex<MemStoreInner>,
}

struct MemStoreInner {
    next_id: u64,
    snippets: Vec<SnippetRecord>,
}

impl MemStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemStoreInner {
                next_id: 1,
                snippets: Vec::new(),
            }),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    fn query(&self, statement: &str, params: &[&str]) -> Result<Vec<Row>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match statement {
            SNIPPET_GET => {
                let [id] = params else {
                    return Err(StoreError::BadParameters(statement.to_string()));
                };
                let id: u64 = id
                    .parse()
                    .map_err(|_| StoreError::BadParameters(statement.to_string()))?;
                inner
                    .snippets
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| vec![snippet_row(s)])
                    .ok_or(StoreError::NoRows)
            }
            SNIPPET_LATEST => {
                let [limit] = params else {
                    return Err(StoreError::BadParameters(statement.to_string()));
                };
                let limit: usize = limit
                    .parse()
                    .map_err(|_| StoreError::BadParameters(statement.to_string()))?;
                Ok(inner
                    .snippets
                    .iter()
                    .rev()
                    .take(limit)
                    .map(snippet_row)
                    .collect())
            }
            _ => Err(StoreError::UnknownStatement(statement.to_string())),
        }
    }

    fn execute(&self, statement: &str, params: &[&str]) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match statement {
            SNIPPET_INSERT => {
                let [title, content] = params else {
                    return Err(StoreError::BadParameters(statement.to_string()));
                };
                let id = inner.next_id;
                inner.next_id += 1;
                inner.snippets.push(SnippetRecord {
                    id,
                    title: (*title).to_string(),
                    content: (*content).to_string(),
                });
                Ok(id)
            }
            _ => Err(StoreError::UnknownStatement(statement.to_string())),
        }
    }
}

fn snippet_row(snippet: &SnippetRecord) -> Row {
    vec![
        snippet.id.to_string(),
        snippet.title.clone(),
        snippet.content.clone(),
    ]
}
