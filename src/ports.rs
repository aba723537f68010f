//! Messages exchanged with the Elm app through its ports.
//!
//! Inbound messages are what the app sends to the host ("subscribe" ports),
//! outbound messages are what the host pushes back ("send" ports).

use serde::Serialize;
use serde_json::Value;

use crate::constants::port;
use crate::platform::{ContainerSize, PointerCapture};

/// Identifier of an image load request. Opaque to the host, echoed back verbatim.
pub type ImageId = Value;

/// Descriptor of a decoded image, as sent to `imageLoaded`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    pub id: ImageId,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Payload of `imageLoadFailed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageLoadFailure {
    pub id: ImageId,
    pub error: String,
}

/// Messages received from the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound<F, E> {
    /// `loadImageFile`: decode `file` and answer with the same `id`.
    LoadImageFile { id: ImageId, file: F },
    /// `loadConfigFile`: read a JSON config file as text.
    LoadConfigFile(F),
    /// `export`: save or submit the annotation payload.
    Export(Value),
    /// `capture`: capture the pointer on the event target.
    Capture(PointerCapture<E>),
}

impl<F, E> Inbound<F, E> {
    /// Name of the port this message arrives on.
    pub fn port_name(&self) -> &'static str {
        match self {
            Inbound::LoadImageFile { .. } => port::LOAD_IMAGE_FILE,
            Inbound::LoadConfigFile(_) => port::LOAD_CONFIG_FILE,
            Inbound::Export(_) => port::EXPORT,
            Inbound::Capture(_) => port::CAPTURE,
        }
    }
}

/// Messages pushed into the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Resizes(ContainerSize),
    ImageLoaded(ImageDescriptor),
    ImageLoadFailed(ImageLoadFailure),
    /// Raw, unparsed config file text
    ConfigLoaded(String),
    ConfigLoadFailed(String),
}

impl Outbound {
    /// Name of the port this message is sent on.
    pub fn port_name(&self) -> &'static str {
        match self {
            Outbound::Resizes(_) => port::RESIZES,
            Outbound::ImageLoaded(_) => port::IMAGE_LOADED,
            Outbound::ImageLoadFailed(_) => port::IMAGE_LOAD_FAILED,
            Outbound::ConfigLoaded(_) => port::CONFIG_LOADED,
            Outbound::ConfigLoadFailed(_) => port::CONFIG_LOAD_FAILED,
        }
    }

    /// JSON value handed to the port's `send`.
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Outbound::Resizes(size) => serde_json::to_value(size),
            Outbound::ImageLoaded(image) => serde_json::to_value(image),
            Outbound::ImageLoadFailed(failure) => serde_json::to_value(failure),
            Outbound::ConfigLoaded(text) | Outbound::ConfigLoadFailed(text) => {
                Ok(Value::String(text.clone()))
            }
        }
    }
}

/// Sink for outbound port messages.
///
/// In the browser this is the app's `ports` object; each message is delivered
/// to `app.ports.<name>.send`.
pub trait Outbox {
    fn send(&self, message: Outbound);
}

/// Serialize an export payload the way `JSON.stringify` does (compact, key order kept).
pub fn serialize_payload(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
