//! File helpers behind the `loadImageFile`, `loadConfigFile` and `export` ports.

use crate::constants::{IMAGE_MIME_PREFIX, JSON_NAME_MARKER};
use crate::error::{FileError, HostError};
use crate::platform::{FileAccess, Host};
use crate::ports::{ImageDescriptor, ImageId};

/// Check if a file name looks like a JSON file.
///
/// Matches on the name and not the MIME type: some platforms report an empty
/// type for `.json` files.
pub fn is_json_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().contains(JSON_NAME_MARKER)
}

/// Check if a MIME type denotes an image.
pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with(IMAGE_MIME_PREFIX)
}

/// Read a JSON config file as text.
///
/// Files whose name does not contain "json" are rejected before any read.
/// The text is returned unparsed.
pub async fn read_json_file<A: FileAccess>(access: &A, file: &A::File) -> Result<String, FileError> {
    let name = access.file_name(file);
    if !is_json_file_name(&name) {
        return Err(FileError::IncorrectFileType { name });
    }
    access.read_text(file).await
}

/// Decode an image file into an [`ImageDescriptor`].
///
/// The returned URL stays valid for the lifetime of the page; it is only
/// revoked here when decoding fails.
pub async fn create_image_object<A: FileAccess>(
    access: &A,
    id: ImageId,
    file: &A::File,
) -> Result<ImageDescriptor, FileError> {
    let mime_type = access.mime_type(file);
    if !is_image_mime_type(&mime_type) {
        return Err(FileError::NotAnImage { mime_type });
    }

    let url = access.create_object_url(file)?;
    match access.decode_image(&url).await {
        Ok(dimensions) => Ok(ImageDescriptor {
            id,
            url,
            width: dimensions.width,
            height: dimensions.height,
        }),
        Err(e) => {
            access.revoke_object_url(&url);
            Err(e)
        }
    }
}

/// Offer `data` as a file download.
///
/// Example: `download(host, &json, "selection.json", "text/plain")`.
pub fn download<H: Host>(host: &H, data: &str, name: &str, mime_type: &str) -> Result<(), HostError> {
    log::debug!("Downloading {} ({} bytes, {})", name, data.len(), mime_type);
    host.trigger_download(data, name, mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Download, MockFile, MockHost};
    use pollster::block_on;
    use serde_json::json;

    #[test]
    fn test_json_name_matching() {
        assert!(is_json_file_name("config.json"));
        assert!(is_json_file_name("CONFIG.JSON"));
        assert!(is_json_file_name("classes.Json.bak"));
        assert!(is_json_file_name("jsonconfig"));
        assert!(!is_json_file_name("config.txt"));
        assert!(!is_json_file_name("config.jsn"));
        assert!(!is_json_file_name(""));
    }

    #[test]
    fn test_image_mime_matching() {
        assert!(is_image_mime_type("image/png"));
        assert!(is_image_mime_type("image/svg+xml"));
        assert!(!is_image_mime_type("text/plain"));
        assert!(!is_image_mime_type(""));
        assert!(!is_image_mime_type("application/image"));
    }

    #[test]
    fn test_read_json_file_rejects_without_reading() {
        let host = MockHost::new();
        let file = MockFile::text("notes.txt", "text/plain", "hello");

        let err = block_on(read_json_file(&host, &file)).unwrap_err();

        assert!(matches!(err, FileError::IncorrectFileType { ref name } if name == "notes.txt"));
        assert!(err.to_string().contains("Incorrect file type"));
        assert_eq!(host.reads.get(), 0);
    }

    #[test]
    fn test_read_json_file_returns_exact_text() {
        let host = MockHost::new();
        let contents = "{\n  \"classes\": [\"cat\", \"dog\"]\n}\n";
        // Empty type, as reported by some browsers for JSON files
        let file = MockFile::text("Classes.JSON", "", contents);

        let text = block_on(read_json_file(&host, &file)).unwrap();

        assert_eq!(text, contents);
        assert_eq!(host.reads.get(), 1);
    }

    #[test]
    fn test_read_json_file_propagates_read_failure() {
        let host = MockHost::new();
        host.fail_reads.set(true);
        let file = MockFile::text("config.json", "application/json", "{}");

        let err = block_on(read_json_file(&host, &file)).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }

    #[test]
    fn test_create_image_object_rejects_non_images() {
        let host = MockHost::new();
        let file = MockFile::text("notes.txt", "text/plain", "hello");

        let err = block_on(create_image_object(&host, json!(1), &file)).unwrap_err();

        assert!(err.to_string().contains("text/plain"));
        assert!(host.created_urls.borrow().is_empty());
    }

    #[test]
    fn test_create_image_object_reports_dimensions() {
        let host = MockHost::new();
        let file = MockFile::image("cat.png", "image/png", 640, 480);

        let image = block_on(create_image_object(&host, json!("cat-1"), &file)).unwrap();

        assert_eq!(image.id, json!("cat-1"));
        assert_eq!((image.width, image.height), (640, 480));
        assert_eq!(host.created_urls.borrow().as_slice(), [image.url.clone()]);
        assert!(host.revoked_urls.borrow().is_empty());
    }

    #[test]
    fn test_create_image_object_decode_failure_revokes_url() {
        let host = MockHost::new();
        let file = MockFile::corrupt_image("broken.png");

        let err = block_on(create_image_object(&host, json!(7), &file)).unwrap_err();

        assert!(matches!(err, FileError::Decode { .. }));
        assert_eq!(*host.created_urls.borrow(), *host.revoked_urls.borrow());
    }

    #[test]
    fn test_download_triggers_single_save() {
        let host = MockHost::new();

        download(&host, "x", "annotations.json", "application/json").unwrap();

        assert_eq!(
            host.downloads.borrow().as_slice(),
            [Download {
                data: "x".to_string(),
                name: "annotations.json".to_string(),
                mime_type: "application/json".to_string(),
            }]
        );
    }
}
