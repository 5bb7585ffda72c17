//! Data models
//!
//! Shapes of the Joplin Data API and Strapi upload payloads, plus the
//! image descriptor the pipeline passes between stages.

use serde::{Deserialize, Serialize};

/// A Joplin note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub body: String,
}

impl Note {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// Resource metadata as returned by `GET /resources/:id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub mime: String,
}

impl Resource {
    /// Whether the resource is an image attachment
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// An image attachment found on a note
///
/// Immutable once built by the scanner.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Resource id, also the target of the `:/id` internal link
    pub id: String,
    /// Display name, reused as link text and upload filename
    pub title: String,
    pub file_extension: String,
    pub mime: String,
}

impl From<Resource> for ImageDescriptor {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            file_extension: resource.file_extension,
            mime: resource.mime,
        }
    }
}

impl ImageDescriptor {
    /// Filename for the upload, never empty
    pub fn upload_filename(&self) -> String {
        if !self.title.is_empty() {
            return self.title.clone();
        }
        if self.file_extension.is_empty() {
            self.id.clone()
        } else {
            format!("{}.{}", self.id, self.file_extension)
        }
    }
}

/// One page of a paginated Data API listing
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Identifier-only item from a listing
#[derive(Debug, Clone, Deserialize)]
pub struct ItemId {
    pub id: String,
}

/// A file entry in Strapi's upload response
///
/// Only `url` is read. Other fields differ between Strapi versions and
/// database backends (numeric or string ids) and are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadedFile {
    /// First non-empty URL in an upload response
    pub fn first_url(files: &[UploadedFile]) -> Option<&str> {
        files
            .first()
            .and_then(|f| f.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}
