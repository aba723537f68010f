//! Static asset server for the annotation app.
//!
//! Serves the pre-built bundle directory with gzip compression. The port and
//! directory come from `SERVER_PORT` and `BUILD_DIR`, usually set in a `.env`
//! file next to the server.

pub mod config;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::{ServerError, bind, router, run, serve};
