// Server loop module
// Accepts connections and hands each one to the connection handler

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::container::Container;
use crate::handler::Router;

/// Accept loop: runs until the process is stopped
///
/// Accept failures are logged and the loop keeps going; a single bad
/// socket must not take the server down.
pub async fn run_accept_loop(
    listener: TcpListener,
    app: Arc<Container>,
    router: Arc<Router>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&app), Arc::clone(&router));
            }
            Err(e) => {
                app.logger.error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
