//! Global constants for the annotation app host glue

/// Port names shared with the Elm app.
pub mod port {
    /// Container size pushed on every window resize.
    pub const RESIZES: &str = "resizes";
    /// Request to decode an image file.
    pub const LOAD_IMAGE_FILE: &str = "loadImageFile";
    /// Decoded image descriptor.
    pub const IMAGE_LOADED: &str = "imageLoaded";
    /// Image load failure, carrying the request id.
    pub const IMAGE_LOAD_FAILED: &str = "imageLoadFailed";
    /// Request to read a JSON config file.
    pub const LOAD_CONFIG_FILE: &str = "loadConfigFile";
    /// Raw config file text.
    pub const CONFIG_LOADED: &str = "configLoaded";
    /// Config load failure message.
    pub const CONFIG_LOAD_FAILED: &str = "configLoadFailed";
    /// Annotation export request.
    pub const EXPORT: &str = "export";
    /// Pointer capture request.
    pub const CAPTURE: &str = "capture";
}

/// Default name of the downloaded annotations file.
pub const DOWNLOAD_FILE_NAME: &str = "annotations.json";

/// MIME type of the downloaded annotations file.
pub const DOWNLOAD_MIME_TYPE: &str = "application/json";

/// Hidden input receiving the serialized annotations in the embedded task page.
pub const FORM_FIELD_ID: &str = "annotation-data";

/// Submit button of the embedded task page.
pub const SUBMIT_BUTTON_ID: &str = "submitButton";

/// Marker searched (case-insensitively) in config file names.
pub const JSON_NAME_MARKER: &str = "json";

/// MIME prefix accepted for image files.
pub const IMAGE_MIME_PREFIX: &str = "image/";
