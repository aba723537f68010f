//! Reduced port bridge for the crowd-work task iframe.
//!
//! The task platform provides the image, so only `resizes` and `export` are
//! wired. Exporting fills the task's hidden input and submits the task.

use serde_json::Value;

use crate::bridge::push_resize;
use crate::config::BridgeConfig;
use crate::error::HostError;
use crate::platform::Host;
use crate::ports::{Outbox, serialize_payload};

pub struct EmbeddedBridge<H, O> {
    host: H,
    outbox: O,
    config: BridgeConfig,
}

impl<H: Host, O: Outbox> EmbeddedBridge<H, O> {
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

    pub fn on_resize(&self) {
        push_resize(&self.host, &self.outbox);
    }

    /// Write the annotations into the hidden input and click submit.
    pub fn export(&self, value: &Value) {
        if let Err(e) = self.submit(value) {
            log::error!("📤 Task submission failed: {}", e);
        }
    }

    fn submit(&self, value: &Value) -> Result<(), HostError> {
        let json = serialize_payload(value).map_err(|e| HostError::Js(e.to_string()))?;
        self.host.submit_form(
            &self.config.form_field_id,
            &self.config.submit_button_id,
            &json,
        )?;
        log::info!("📤 Submitted {} bytes of annotations", json.len());
        Ok(())
    }
}
