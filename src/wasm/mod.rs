//! JavaScript entry points.
//!
//! The host page initialises the Elm app and hands it over:
//!
//! ```js
//! import init, { activatePorts } from "./annotation_app.js";
//! await init();
//! const app = Elm.Main.init({ node: container });
//! activatePorts(app, containerSize, { logLevel: "debug" });
//! ```

mod platform;
mod ports;

use std::rc::Rc;

use js_sys::{Function, JSON};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::bridge::PortBridge;
use crate::config::BridgeConfig;
use crate::constants::port;
use crate::embedded::EmbeddedBridge;
use crate::ports::Inbound;

pub use platform::WebPlatform;
pub use ports::{ElmPorts, WebInbound, decode_inbound};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Wire the full set of ports: resize, image and config loading, export, pointer capture.
#[wasm_bindgen(js_name = activatePorts)]
pub fn activate_ports(
    app: JsValue,
    container_size: Function,
    options: JsValue,
) -> Result<(), JsValue> {
    let config = parse_options(&options)?;
    init_logging(&config);

    let ports = ElmPorts::from_app(&app)?;
    let bridge = Rc::new(PortBridge::new(
        WebPlatform::new(container_size)?,
        ports,
        config,
    ));

    let on_resize = bridge.clone();
    listen_resize(move || on_resize.on_resize())?;

    for name in [
        port::LOAD_IMAGE_FILE,
        port::LOAD_CONFIG_FILE,
        port::EXPORT,
        port::CAPTURE,
    ] {
        let handler = bridge.clone();
        bridge.outbox().subscribe(name, move |value| {
            match decode_inbound(name, value) {
                Ok(Inbound::Export(value)) => handler.export(&value),
                Ok(Inbound::Capture(event)) => handler.capture(&event),
                Ok(message) => {
                    let handler = handler.clone();
                    spawn_local(async move { handler.dispatch(message).await });
                }
                Err(e) => log::error!("Malformed '{}' message: {:?}", name, e),
            }
        })?;
    }

    log::info!("Ports activated");
    Ok(())
}

/// Wire the crowd-work task ports: resize and form-submitting export.
#[wasm_bindgen(js_name = activateEmbeddedPorts)]
pub fn activate_embedded_ports(
    app: JsValue,
    container_size: Function,
    options: JsValue,
) -> Result<(), JsValue> {
    let config = parse_options(&options)?;
    init_logging(&config);

    let ports = ElmPorts::from_app(&app)?;
    let bridge = Rc::new(EmbeddedBridge::new(
        WebPlatform::new(container_size)?,
        ports,
        config,
    ));

    let on_resize = bridge.clone();
    listen_resize(move || on_resize.on_resize())?;

    let handler = bridge.clone();
    bridge.outbox().subscribe(port::EXPORT, move |value| {
        match decode_inbound(port::EXPORT, value) {
            Ok(Inbound::Export(value)) => handler.export(&value),
            Ok(_) => {}
            Err(e) => log::error!("Malformed export message: {:?}", e),
        }
    })?;

    log::info!("Embedded ports activated");
    Ok(())
}

fn parse_options(options: &JsValue) -> Result<BridgeConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(BridgeConfig::default());
    }
    let json: String = JSON::stringify(options)?.into();
    BridgeConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn init_logging(config: &BridgeConfig) {
    // A second activation only adjusts the level
    if console_log::init_with_level(config.log_level.to_level()).is_err() {
        log::set_max_level(config.log_level.to_level_filter());
    }
}

/// Call `handler` on every window resize event.
fn listen_resize(handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let closure = Closure::<dyn FnMut()>::new(handler);
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
