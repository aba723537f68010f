//! Host platform capabilities.
//!
//! The bridges and file utilities never touch browser APIs directly. They are
//! generic over these two traits, which the `wasm` module implements on top of
//! `web_sys` and the test suite implements in memory.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{FileError, HostError};

/// Size of the element hosting the Elm app.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Intrinsic dimensions of a decoded image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// A pointer event forwarded by the app so its target can capture the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerCapture<E> {
    /// Element that should receive subsequent pointer events
    pub target: E,
    /// Pointer identifier from the originating event
    pub pointer_id: i32,
}

/// Read access to user-selected files.
///
/// Implementations must not mutate the file handles they are given.
pub trait FileAccess {
    /// Platform file handle (a `web_sys::File` in the browser).
    type File;

    /// File name as reported by the platform.
    fn file_name(&self, file: &Self::File) -> String;

    /// MIME type as reported by the platform. May be empty.
    fn mime_type(&self, file: &Self::File) -> String;

    /// Read the whole file as UTF-8 text.
    fn read_text(&self, file: &Self::File) -> impl Future<Output = Result<String, FileError>>;

    /// Create an in-memory URL resolving to the file contents.
    fn create_object_url(&self, file: &Self::File) -> Result<String, FileError>;

    /// Release a URL previously returned by [`FileAccess::create_object_url`].
    fn revoke_object_url(&self, url: &str);

    /// Decode the image behind `url` and report its intrinsic dimensions.
    fn decode_image(&self, url: &str) -> impl Future<Output = Result<ImageDimensions, FileError>>;
}

/// Side-effecting host actions.
pub trait Host {
    /// Element type pointer capture is requested on.
    type Element;

    /// Size of the app container, computed on demand.
    fn container_size(&self) -> Result<ContainerSize, HostError>;

    /// Offer `data` to the user as a file download named `name`.
    fn trigger_download(&self, data: &str, name: &str, mime_type: &str) -> Result<(), HostError>;

    /// Write `value` into the input `field_id` and click the button `button_id`.
    fn submit_form(&self, field_id: &str, button_id: &str, value: &str) -> Result<(), HostError>;

    /// Route all further events of `pointer_id` to `target`.
    fn set_pointer_capture(&self, target: &Self::Element, pointer_id: i32)
    -> Result<(), HostError>;
}
