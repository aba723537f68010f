//! Server configuration from the environment.
//!
//! Variables are read from the process environment after loading a `.env`
//! file from the base directory. Variables already set in the environment win
//! over the file.

use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Port to listen on.
pub const PORT_VAR: &str = "SERVER_PORT";

/// Directory of the pre-built bundle, relative to the base directory.
pub const BUILD_DIR_VAR: &str = "BUILD_DIR";

/// Name of the dotenv file looked up in the base directory.
pub const ENV_FILE: &str = ".env";

/// Errors that can occur when loading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    /// The port is not an integer in 0..=65535
    #[error("Invalid SERVER_PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The dotenv file exists but could not be parsed
    #[error("Failed to load {path:?}: {source}")]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Absolute or base-relative path of the static root
    pub build_dir: PathBuf,
}

impl ServerConfig {
    /// Load `.env` from `base_dir`, then read the configuration from the environment.
    pub fn load(base_dir: &Path) -> Result<Self, ConfigError> {
        match load_env_file(base_dir)? {
            Some(path) => log::debug!("Loaded environment from {:?}", path),
            None => log::debug!("No {} file in {:?}", ENV_FILE, base_dir),
        }
        Self::from_lookup(base_dir, |key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup.
    ///
    /// `BUILD_DIR` is resolved against `base_dir`.
    pub fn from_lookup(
        base_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let port_value = lookup(PORT_VAR).ok_or(ConfigError::MissingVar(PORT_VAR))?;
        let port = parse_port(&port_value)?;
        let build_dir = lookup(BUILD_DIR_VAR).ok_or(ConfigError::MissingVar(BUILD_DIR_VAR))?;

        Ok(Self {
            port,
            build_dir: base_dir.join(build_dir),
        })
    }

    /// Address the server binds to (all interfaces).
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort {
            value: value.to_string(),
            source,
        })
}

/// Load `base_dir/.env` into the process environment. A missing file is not an error.
fn load_env_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let path = base_dir.join(ENV_FILE);
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(source) => Err(ConfigError::Dotenv { path, source }),
    }
}
