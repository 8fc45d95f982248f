// Server module entry point
// Listener creation, the accept loop, and per-connection handling

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module file keeps the short name on disk
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used entry points
pub use listener::create_reusable_listener;
pub use server_loop::run_accept_loop;
