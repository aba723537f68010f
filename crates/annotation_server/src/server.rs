//! Static file serving with gzip compression.

use std::io;
use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;

/// Errors that can occur while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listening socket could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Accepting or serving connections failed
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// Router serving `build_dir` as the static root.
///
/// Directory paths serve their `index.html`. There are no other routes.
pub fn router(build_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(build_dir))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    log::debug!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

/// Bind the listening socket for `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let addr = config.address();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `build_dir` on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, build_dir: &Path) -> Result<(), ServerError> {
    axum::serve(listener, router(build_dir)).await?;
    Ok(())
}

/// Bind and serve according to `config`.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    if !config.build_dir.is_dir() {
        log::warn!(
            "Build directory {:?} does not exist, every request will 404",
            config.build_dir
        );
    }
    let listener = bind(&config).await?;
    log::info!("Server listening on port {}", config.port);
    serve(listener, &config.build_dir).await
}
