//! Access to the Elm app's `ports` object.

use js_sys::{Function, JSON, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, File};

use crate::constants::port;
use crate::platform::PointerCapture;
use crate::ports::{Inbound, Outbound, Outbox};
use crate::wasm::platform::js_message;

/// Inbound message carrying browser handles.
pub type WebInbound = Inbound<File, Element>;

/// The `app.ports` object of an initialised Elm app.
pub struct ElmPorts {
    ports: JsValue,
}

impl ElmPorts {
    pub fn from_app(app: &JsValue) -> Result<Self, JsValue> {
        let ports = Reflect::get(app, &JsValue::from_str("ports"))?;
        if ports.is_undefined() || ports.is_null() {
            return Err(JsValue::from_str("the app declares no ports"));
        }
        Ok(Self { ports })
    }

    fn port(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.ports, &JsValue::from_str(name))
            .ok()
            .filter(|port| !port.is_undefined())
    }

    /// Subscribe `callback` to an app-to-host port.
    ///
    /// Returns `Ok(false)` when the app does not declare the port.
    pub fn subscribe(
        &self,
        name: &str,
        callback: impl FnMut(JsValue) + 'static,
    ) -> Result<bool, JsValue> {
        let Some(port) = self.port(name) else {
            log::warn!("App has no '{}' port, not subscribing", name);
            return Ok(false);
        };
        let subscribe: Function = Reflect::get(&port, &JsValue::from_str("subscribe"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("port '{}' cannot be subscribed to", name)))?;

        let closure = Closure::<dyn FnMut(JsValue)>::new(callback);
        subscribe.call1(&port, closure.as_ref())?;
        // Subscriptions live as long as the page
        closure.forget();
        Ok(true)
    }

    fn push(&self, port: &JsValue, name: &str, payload: &Value) -> Result<(), JsValue> {
        let send: Function = Reflect::get(port, &JsValue::from_str("send"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("port '{}' cannot be sent to", name)))?;
        send.call1(port, &to_js(payload)?)?;
        Ok(())
    }
}

impl Outbox for ElmPorts {
    fn send(&self, message: Outbound) {
        let name = message.port_name();
        let Some(port) = self.port(name) else {
            log::warn!("App has no '{}' port, dropping message", name);
            return;
        };
        let result = message
            .payload()
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|payload| self.push(&port, name, &payload));
        if let Err(e) = result {
            log::error!("Failed to send on '{}': {}", name, js_message(&e));
        }
    }
}

fn to_js(value: &Value) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&text)
}

fn from_js(value: &JsValue) -> Result<Value, JsValue> {
    if value.is_undefined() {
        return Ok(Value::Null);
    }
    let text: String = JSON::stringify(value)?.into();
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn field(value: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(value, &JsValue::from_str(key))
}

fn into_file(value: JsValue) -> Result<File, JsValue> {
    value
        .dyn_into::<File>()
        .map_err(|_| JsValue::from_str("expected a File"))
}

/// Decode the raw value received on the port `name`.
pub fn decode_inbound(name: &str, value: JsValue) -> Result<WebInbound, JsValue> {
    match name {
        port::LOAD_IMAGE_FILE => Ok(Inbound::LoadImageFile {
            id: from_js(&field(&value, "id")?)?,
            file: into_file(field(&value, "file")?)?,
        }),
        port::LOAD_CONFIG_FILE => Ok(Inbound::LoadConfigFile(into_file(value)?)),
        port::EXPORT => Ok(Inbound::Export(from_js(&value)?)),
        port::CAPTURE => {
            let target = field(&value, "target")?
                .dyn_into::<Element>()
                .map_err(|_| JsValue::from_str("pointer event target is not an element"))?;
            let pointer_id = field(&value, "pointerId")?
                .as_f64()
                .ok_or_else(|| JsValue::from_str("pointer event has no pointerId"))?;
            Ok(Inbound::Capture(PointerCapture {
                target,
                pointer_id: pointer_id as i32,
            }))
        }
        other => Err(JsValue::from_str(&format!("unknown port '{}'", other))),
    }
}
