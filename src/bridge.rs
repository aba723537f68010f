//! Port bridge for the standalone annotation app.
//!
//! Wires the app's ports to the host:
//! - `resizes`: container size on every window resize (no debouncing)
//! - `loadImageFile` -> `imageLoaded` / `imageLoadFailed`
//! - `loadConfigFile` -> `configLoaded` / `configLoadFailed`
//! - `export`: annotations downloaded as a JSON file
//! - `capture`: pointer capture for drags leaving the element

use serde_json::Value;

use crate::config::BridgeConfig;
use crate::file_utils::{create_image_object, download, read_json_file};
use crate::platform::{FileAccess, Host, PointerCapture};
use crate::ports::{ImageId, ImageLoadFailure, Inbound, Outbound, Outbox, serialize_payload};

/// Bridge between the app's ports and the host platform.
///
/// Requests are independent: two loads in flight may complete in any order,
/// and each one produces exactly one outbound message.
pub struct PortBridge<H, O> {
    host: H,
    outbox: O,
    config: BridgeConfig,
}

impl<H, O> PortBridge<H, O>
where
    H: FileAccess + Host,
    O: Outbox,
{
    pub fn new(host: H, outbox: O, config: BridgeConfig) -> Self {
        Self {
            host,
            outbox,
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Handle one inbound message.
    pub async fn dispatch(&self, message: Inbound<<H as FileAccess>::File, <H as Host>::Element>) {
        log::trace!("Port message on '{}'", message.port_name());
        match message {
            Inbound::LoadImageFile { id, file } => self.load_image_file(id, &file).await,
            Inbound::LoadConfigFile(file) => self.load_config_file(&file).await,
            Inbound::Export(value) => self.export(&value),
            Inbound::Capture(event) => self.capture(&event),
        }
    }

    /// Push the current container size to `resizes`.
    pub fn on_resize(&self) {
        push_resize(&self.host, &self.outbox);
    }

    /// Decode an image and answer on `imageLoaded`, or `imageLoadFailed` on error.
    pub async fn load_image_file(&self, id: ImageId, file: &<H as FileAccess>::File) {
        match create_image_object(&self.host, id.clone(), file).await {
            Ok(image) => {
                log::debug!(
                    "🖼️ Image {} loaded ({}x{})",
                    image.id,
                    image.width,
                    image.height
                );
                self.outbox.send(Outbound::ImageLoaded(image));
            }
            Err(e) => {
                log::error!("🖼️ Failed to load image {}: {}", id, e);
                self.outbox.send(Outbound::ImageLoadFailed(ImageLoadFailure {
                    id,
                    error: e.to_string(),
                }));
            }
        }
    }

    /// Read a config file and answer on `configLoaded`, or `configLoadFailed` on error.
    pub async fn load_config_file(&self, file: &<H as FileAccess>::File) {
        match read_json_file(&self.host, file).await {
            Ok(text) => {
                log::debug!("📂 Config file read: {} bytes", text.len());
                self.outbox.send(Outbound::ConfigLoaded(text));
            }
            Err(e) => {
                log::error!("📂 Failed to load config file: {}", e);
                self.outbox.send(Outbound::ConfigLoadFailed(e.to_string()));
            }
        }
    }

    /// Save the annotations as a JSON download. Nothing is sent back to the app.
    pub fn export(&self, value: &Value) {
        let result = serialize_payload(value)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                download(
                    &self.host,
                    &json,
                    &self.config.download_file_name,
                    &self.config.download_mime_type,
                )
                .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            log::error!("💾 Export failed: {}", e);
        }
    }

    /// Capture the pointer on the event target.
    pub fn capture(&self, event: &PointerCapture<<H as Host>::Element>) {
        match self.host.set_pointer_capture(&event.target, event.pointer_id) {
            Ok(()) => log::debug!("captured pointer {}", event.pointer_id),
            Err(e) => log::error!("Pointer capture failed for {}: {}", event.pointer_id, e),
        }
    }
}

/// Query the container size and push it to `resizes`.
pub(crate) fn push_resize<H: Host, O: Outbox>(host: &H, outbox: &O) {
    match host.container_size() {
        Ok(size) => outbox.send(Outbound::Resizes(size)),
        Err(e) => log::error!("Failed to compute container size: {}", e),
    }
}
