//! Browser implementation of the host capabilities.

use std::future::Future;

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, File, FileReader, HtmlElement, HtmlImageElement,
    HtmlInputElement, Url,
};

use crate::error::{FileError, HostError};
use crate::platform::{ContainerSize, FileAccess, Host, ImageDimensions};

/// Host backed by `web_sys`.
pub struct WebPlatform {
    document: Document,
    /// Host page function returning `{ width, height }`
    container_size: Function,
}

impl WebPlatform {
    pub fn new(container_size: Function) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        Ok(Self {
            document,
            container_size,
        })
    }

    fn element_by_id(&self, id: &str) -> Result<Element, HostError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| HostError::missing_element(id))
    }
}

/// Best-effort text of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

fn js_error(value: JsValue) -> HostError {
    HostError::Js(js_message(&value))
}

/// Promise settled by the `onload` / `onerror` handlers installed by `register`.
fn load_promise(register: impl FnOnce(&Function, &Function)) -> Promise {
    let mut register = Some(register);
    Promise::new(&mut |resolve, reject| {
        if let Some(register) = register.take() {
            register(&resolve, &reject);
        }
    })
}

impl FileAccess for WebPlatform {
    type File = File;

    fn file_name(&self, file: &File) -> String {
        file.name()
    }

    fn mime_type(&self, file: &File) -> String {
        file.type_()
    }

    fn read_text(&self, file: &File) -> impl Future<Output = Result<String, FileError>> {
        let file = file.clone();
        async move {
            let name = file.name();
            let reader = FileReader::new().map_err(|e| FileError::read(&name, js_message(&e)))?;
            let loaded = load_promise(|resolve, reject| {
                reader.set_onload(Some(resolve));
                reader.set_onerror(Some(reject));
            });
            reader
                .read_as_text(&file)
                .map_err(|e| FileError::read(&name, js_message(&e)))?;

            JsFuture::from(loaded).await.map_err(|_| {
                let message = reader
                    .error()
                    .map(|e| e.message())
                    .unwrap_or_else(|| "read failed".to_string());
                FileError::read(&name, message)
            })?;

            reader
                .result()
                .ok()
                .and_then(|result| result.as_string())
                .ok_or_else(|| FileError::read(&name, "reader produced no text"))
        }
    }

    fn create_object_url(&self, file: &File) -> Result<String, FileError> {
        Url::create_object_url_with_blob(file)
            .map_err(|e| FileError::object_url(file.name(), js_message(&e)))
    }

    fn revoke_object_url(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {}", url, js_message(&e));
        }
    }

    fn decode_image(&self, url: &str) -> impl Future<Output = Result<ImageDimensions, FileError>> {
        let url = url.to_string();
        async move {
            let img = HtmlImageElement::new().map_err(|e| FileError::decode(&url, js_message(&e)))?;
            let loaded = load_promise(|resolve, reject| {
                img.set_onload(Some(resolve));
                img.set_onerror(Some(reject));
            });
            img.set_src(&url);

            JsFuture::from(loaded)
                .await
                .map_err(|_| FileError::decode(&url, "the browser could not decode the image"))?;

            Ok(ImageDimensions {
                width: img.natural_width(),
                height: img.natural_height(),
            })
        }
    }
}

impl Host for WebPlatform {
    type Element = Element;

    fn container_size(&self) -> Result<ContainerSize, HostError> {
        let size = self
            .container_size
            .call0(&JsValue::NULL)
            .map_err(js_error)?;
        let dimension = |key: &str| -> Result<f64, HostError> {
            Reflect::get(&size, &JsValue::from_str(key))
                .map_err(js_error)?
                .as_f64()
                .ok_or_else(|| HostError::Js(format!("container size has no numeric '{}'", key)))
        };
        Ok(ContainerSize::new(dimension("width")?, dimension("height")?))
    }

    fn trigger_download(&self, data: &str, name: &str, mime_type: &str) -> Result<(), HostError> {
        let parts = Array::new();
        parts.push(&JsValue::from_str(data));
        let options = BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let anchor = self
            .document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| HostError::Js("created anchor is not an HtmlElement".to_string()))?;
        anchor.set_attribute("href", &url).map_err(js_error)?;
        anchor.set_attribute("download", name).map_err(js_error)?;
        anchor.click();

        Url::revoke_object_url(&url).map_err(js_error)
    }

    fn submit_form(&self, field_id: &str, button_id: &str, value: &str) -> Result<(), HostError> {
        let input = self
            .element_by_id(field_id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| HostError::wrong_element_type(field_id, "an input element"))?;
        let button = self
            .element_by_id(button_id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| HostError::wrong_element_type(button_id, "an HTML element"))?;

        input.set_value(value);
        button.click();
        Ok(())
    }

    fn set_pointer_capture(&self, target: &Element, pointer_id: i32) -> Result<(), HostError> {
        target.set_pointer_capture(pointer_id).map_err(js_error)
    }
}
