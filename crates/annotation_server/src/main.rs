//! `annotation-server` binary entry point.

use anyhow::{Context, Result};
use annotation_server::{ServerConfig, run};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = ServerConfig::load(&base_dir)?;
    log::debug!("Serving {:?}", config.build_dir);

    run(config).await?;
    Ok(())
}
