//! In-memory host used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::{Future, ready};

use crate::constants::{FORM_FIELD_ID, SUBMIT_BUTTON_ID};
use crate::error::{FileError, HostError};
use crate::platform::{ContainerSize, FileAccess, Host, ImageDimensions};
use crate::ports::{Outbound, Outbox};

/// A fake user-selected file.
#[derive(Debug, Clone)]
pub struct MockFile {
    pub name: String,
    pub mime_type: String,
    pub contents: String,
    /// `None` makes decoding fail like a corrupt image
    pub dimensions: Option<ImageDimensions>,
}

impl MockFile {
    pub fn text(name: &str, mime_type: &str, contents: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            contents: contents.to_string(),
            dimensions: None,
        }
    }

    pub fn image(name: &str, mime_type: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            contents: String::new(),
            dimensions: Some(ImageDimensions { width, height }),
        }
    }

    pub fn corrupt_image(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            contents: String::new(),
            dimensions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub data: String,
    pub name: String,
    pub mime_type: String,
}

/// Records every host interaction.
#[derive(Debug)]
pub struct MockHost {
    pub reads: Cell<usize>,
    pub created_urls: RefCell<Vec<String>>,
    pub revoked_urls: RefCell<Vec<String>>,
    images: RefCell<HashMap<String, Option<ImageDimensions>>>,
    pub downloads: RefCell<Vec<Download>>,
    elements: RefCell<HashSet<String>>,
    pub field_values: RefCell<HashMap<String, String>>,
    pub clicks: RefCell<HashMap<String, usize>>,
    pub captures: RefCell<Vec<(String, i32)>>,
    pub size: Cell<ContainerSize>,
    pub size_queries: Cell<usize>,
    pub fail_reads: Cell<bool>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            reads: Cell::new(0),
            created_urls: RefCell::new(Vec::new()),
            revoked_urls: RefCell::new(Vec::new()),
            images: RefCell::new(HashMap::new()),
            downloads: RefCell::new(Vec::new()),
            elements: RefCell::new(HashSet::new()),
            field_values: RefCell::new(HashMap::new()),
            clicks: RefCell::new(HashMap::new()),
            captures: RefCell::new(Vec::new()),
            size: Cell::new(ContainerSize::new(1024.0, 768.0)),
            size_queries: Cell::new(0),
            fail_reads: Cell::new(false),
        }
    }

    /// Host page with the hidden input and submit button of the crowd-work form.
    pub fn with_task_form() -> Self {
        let host = Self::new();
        host.add_element(FORM_FIELD_ID);
        host.add_element(SUBMIT_BUTTON_ID);
        host
    }

    pub fn add_element(&self, id: &str) {
        self.elements.borrow_mut().insert(id.to_string());
    }

    pub fn clicks_on(&self, id: &str) -> usize {
        self.clicks.borrow().get(id).copied().unwrap_or(0)
    }

    fn require(&self, id: &str) -> Result<(), HostError> {
        if self.elements.borrow().contains(id) {
            Ok(())
        } else {
            Err(HostError::missing_element(id))
        }
    }
}

impl FileAccess for MockHost {
    type File = MockFile;

    fn file_name(&self, file: &MockFile) -> String {
        file.name.clone()
    }

    fn mime_type(&self, file: &MockFile) -> String {
        file.mime_type.clone()
    }

    fn read_text(&self, file: &MockFile) -> impl Future<Output = Result<String, FileError>> {
        self.reads.set(self.reads.get() + 1);
        let result = if self.fail_reads.get() {
            Err(FileError::read(&file.name, "read aborted"))
        } else {
            Ok(file.contents.clone())
        };
        ready(result)
    }

    fn create_object_url(&self, file: &MockFile) -> Result<String, FileError> {
        let url = format!(
            "blob:mock/{}/{}",
            self.created_urls.borrow().len(),
            file.name
        );
        self.created_urls.borrow_mut().push(url.clone());
        self.images
            .borrow_mut()
            .insert(url.clone(), file.dimensions);
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) {
        self.revoked_urls.borrow_mut().push(url.to_string());
    }

    fn decode_image(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ImageDimensions, FileError>> {
        let result = match self.images.borrow().get(url) {
            Some(Some(dimensions)) => Ok(*dimensions),
            _ => Err(FileError::decode(url, "image failed to load")),
        };
        ready(result)
    }
}

impl Host for MockHost {
    /// Elements are identified by their id.
    type Element = String;

    fn container_size(&self) -> Result<ContainerSize, HostError> {
        self.size_queries.set(self.size_queries.get() + 1);
        Ok(self.size.get())
    }

    fn trigger_download(&self, data: &str, name: &str, mime_type: &str) -> Result<(), HostError> {
        self.downloads.borrow_mut().push(Download {
            data: data.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        });
        Ok(())
    }

    fn submit_form(&self, field_id: &str, button_id: &str, value: &str) -> Result<(), HostError> {
        self.require(field_id)?;
        self.require(button_id)?;
        self.field_values
            .borrow_mut()
            .insert(field_id.to_string(), value.to_string());
        *self
            .clicks
            .borrow_mut()
            .entry(button_id.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    fn set_pointer_capture(&self, target: &String, pointer_id: i32) -> Result<(), HostError> {
        self.require(target)?;
        self.captures.borrow_mut().push((target.clone(), pointer_id));
        Ok(())
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbox collecting every message pushed into the app.
#[derive(Debug, Default)]
pub struct RecordingOutbox {
    pub sent: RefCell<Vec<Outbound>>,
}

impl RecordingOutbox {
    pub fn messages(&self) -> Vec<Outbound> {
        self.sent.borrow().clone()
    }
}

impl Outbox for RecordingOutbox {
    fn send(&self, message: Outbound) {
        self.sent.borrow_mut().push(message);
    }
}
