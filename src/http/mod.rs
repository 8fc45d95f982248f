//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from routing and
//! business logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{html, redirect, see_other, status_response};
