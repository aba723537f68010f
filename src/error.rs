//! Error types for host file and DOM operations.

use thiserror::Error;

/// Errors that can occur while reading or decoding a user-provided file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// Config file name does not look like JSON
    #[error("Incorrect file type, please load JSON file.")]
    IncorrectFileType {
        /// Name of the rejected file
        name: String,
    },

    /// File MIME type is not `image/*`
    #[error("Not an image file: {mime_type}")]
    NotAnImage {
        /// The MIME type reported for the file
        mime_type: String,
    },

    /// Reading the file contents failed
    #[error("Failed to read file '{name}': {message}")]
    Read {
        /// Name of the file being read
        name: String,
        /// Description of the failure
        message: String,
    },

    /// The browser could not decode the image
    #[error("Failed to decode image '{name}': {message}")]
    Decode {
        /// Name of the image file
        name: String,
        /// Description of the failure
        message: String,
    },

    /// Creating an object URL for the file failed
    #[error("Failed to create object URL for '{name}': {message}")]
    ObjectUrl {
        /// Name of the file
        name: String,
        /// Description of the failure
        message: String,
    },
}

impl FileError {
    /// Create a read error.
    pub fn read(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an object URL error.
    pub fn object_url(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ObjectUrl {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the file was rejected before any I/O was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::IncorrectFileType { .. } | Self::NotAnImage { .. }
        )
    }
}

/// Errors raised by host platform actions (downloads, DOM lookups, pointer capture).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// No element with the given id exists in the document
    #[error("Element not found: #{id}")]
    MissingElement {
        /// The element id that was looked up
        id: String,
    },

    /// Element exists but is not of the expected kind
    #[error("Element #{id} is not {expected}")]
    WrongElementType {
        /// The element id
        id: String,
        /// Expected element kind, with article
        expected: &'static str,
    },

    /// A browser API call threw
    #[error("Browser API error: {0}")]
    Js(String),
}

impl HostError {
    /// Create a missing element error.
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a wrong element type error.
    pub fn wrong_element_type(id: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongElementType {
            id: id.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_file_type_message() {
        let err = FileError::IncorrectFileType {
            name: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Incorrect file type, please load JSON file.");
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_an_image_message_names_type() {
        let err = FileError::NotAnImage {
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(err.to_string(), "Not an image file: text/plain");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_errors_are_not_validation() {
        assert!(!FileError::read("a.json", "aborted").is_validation());
        assert!(!FileError::decode("a.png", "corrupt").is_validation());
    }

    #[test]
    fn test_host_error_messages() {
        assert_eq!(
            HostError::missing_element("submitButton").to_string(),
            "Element not found: #submitButton"
        );
        assert_eq!(
            HostError::wrong_element_type("annotation-data", "an input element").to_string(),
            "Element #annotation-data is not an input element"
        );
    }
}
