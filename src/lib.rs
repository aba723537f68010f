//! Annotation app host glue
//!
//! Bridges the Elm annotation app's ports to browser APIs: reading config
//! files, decoding images, downloading or submitting annotations, pointer
//! capture and container resizes. The bridges are generic over the host
//! capabilities in [`platform`], implemented for the browser in the `wasm`
//! module.

pub mod bridge;
pub mod config;
pub mod constants;
pub mod embedded;
pub mod error;
pub mod file_utils;
pub mod platform;
pub mod ports;

#[cfg(test)]
mod mock;

pub use bridge::PortBridge;
pub use config::{BridgeConfig, LogLevel};
pub use embedded::EmbeddedBridge;
pub use error::{FileError, HostError};
pub use platform::{ContainerSize, FileAccess, Host, ImageDimensions, PointerCapture};
pub use ports::{ImageDescriptor, ImageId, Inbound, Outbound, Outbox};

// WASM entry points
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
