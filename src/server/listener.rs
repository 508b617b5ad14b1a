use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::router::Router;
use crate::store::FileStore;

/// Binds the configured address and serves until the accept loop fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    match &cfg.directory {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => tracing::warn!("No directory configured, /files routes will answer 404"),
    }

    let router = Router::new(cfg.directory.as_ref().map(FileStore::new));
    serve(listener, Arc::new(router), cfg.read_buffer_size).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    read_buffer_size: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Error accepting connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router).with_read_buffer_size(read_buffer_size);
            if let Err(e) = conn.run().await {
                tracing::error!(peer = %peer, error = %format!("{:#}", e), "Connection error");
            }
        });
    }
}
