//! Client-side configuration for the port bridges.
//!
//! The host page may pass an options object to `activatePorts`; every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::constants::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE, FORM_FIELD_ID, SUBMIT_BUTTON_ID};

/// Log level setting for the browser console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

/// Options accepted by the bridge entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Console verbosity
    pub log_level: LogLevel,

    /// Name of the file offered by `export`
    pub download_file_name: String,

    /// MIME type of the file offered by `export`
    pub download_mime_type: String,

    /// Hidden input receiving the annotations in the embedded task page
    pub form_field_id: String,

    /// Button clicked to submit the embedded task
    pub submit_button_id: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            download_file_name: DOWNLOAD_FILE_NAME.to_string(),
            download_mime_type: DOWNLOAD_MIME_TYPE.to_string(),
            form_field_id: FORM_FIELD_ID.to_string(),
            submit_button_id: SUBMIT_BUTTON_ID.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse options from JSON. `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Errors that can occur when parsing bridge options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse bridge options: {0}")]
    ParseError(#[from] serde_json::Error),
}
