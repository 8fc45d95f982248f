//! minimux: a minimal dispatch-and-injection HTTP server
//!
//! Startup order matters: configuration, then the logger sinks, then the
//! store, then the container bundling them, then the route table whose
//! handler factories capture the container. Nothing is mutated after the
//! accept loop starts.

use std::sync::Arc;

mod config;
mod container;
mod error;
mod handler;
mod http;
mod logger;
mod server;
mod store;

use container::Container;
use handler::{pages, Router, StaticFiles};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    let logger = Arc::new(logger::Logger::open(
        cfg.logging.info_log_file.as_deref(),
        cfg.logging.error_log_file.as_deref(),
    )?);
    let store = Arc::new(store::MemStore::new());
    let app = Arc::new(Container::new(logger, store));
    let router = Arc::new(build_router(&cfg, &app)?);

    let listener = server::create_reusable_listener(addr)?;
    app.logger.info(&format!("Listening on http://{addr}"));
    if let Some(workers) = cfg.server.workers {
        app.logger.info(&format!("Worker threads: {workers}"));
    }
    app.logger.info(&format!(
        "Serving static files from '{}' under {}",
        cfg.static_files.dir, cfg.static_files.prefix
    ));

    server::run_accept_loop(listener, app, router).await
}

/// Build the route table, binding each handler factory to the container
/// exactly once
fn build_router(cfg: &config::Config, app: &Arc<Container>) -> Result<Router, error::RouterError> {
    let mut router = Router::new();
    router.register("/", Arc::new(pages::home(Arc::clone(app))))?;
    router.register("/snippet/view", Arc::new(pages::snippet_view(Arc::clone(app))))?;
    router.register(
        "/snippet/create",
        Arc::new(pages::snippet_create(Arc::clone(app))),
    )?;
    router.register(
        &cfg.static_files.prefix,
        Arc::new(StaticFiles::new(
            cfg.static_files.prefix.clone(),
            cfg.static_files.dir.clone(),
        )),
    )?;
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[test]
    fn test_route_table_registers_cleanly() {
        let cfg = config::Config {
            server: config::ServerConfig {
                addr: "127.0.0.1:0".to_string(),
                workers: None,
            },
            logging: config::LoggingConfig::default(),
            static_files: config::StaticConfig {
                prefix: "/static/".to_string(),
                dir: "static".to_string(),
            },
        };
        let app = Arc::new(Container::new(
            Arc::new(logger::Logger::stdio()),
            Arc::new(MemStore::new()),
        ));
        assert!(build_router(&cfg, &app).is_ok());
    }
}
