//! Strapi uploads
//!
//! Sends one resource file to Strapi's upload plugin (`POST /api/upload`)
//! as `multipart/form-data`.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::UploadError;
use crate::models::{ImageDescriptor, UploadedFile};
use crate::paths::{expand_home, resource_file};

/// Form field Strapi reads uploaded files from
pub const FILES_FIELD: &str = "files";

/// Longest error body kept from a rejected upload
const MAX_ERROR_BODY: usize = 200;

/// Uploads resource files to Strapi
#[derive(Debug, Clone, Default)]
pub struct StrapiUploader {
    client: reqwest::Client,
}

impl StrapiUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the file behind `image`
    ///
    /// No retry. Failures are logged and returned, they never panic.
    pub async fn upload(
        &self,
        settings: &Settings,
        image: &ImageDescriptor,
    ) -> Result<Vec<UploadedFile>, UploadError> {
        let result = self.upload_inner(settings, image).await;
        if let Err(ref e) = result {
            warn!("Error during upload of {} ({}): {}", image.title, image.id, e);
        }
        result
    }

    async fn upload_inner(
        &self,
        settings: &Settings,
        image: &ImageDescriptor,
    ) -> Result<Vec<UploadedFile>, UploadError> {
        let resources_dir = expand_home(&settings.resources_path);
        let path = resource_file(&resources_dir, &image.id, &image.file_extension);
        debug!("File path: {}", path.display());

        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| UploadError::from_io(e, path.clone()))?;

        let filename = image.upload_filename();
        let mut part = Part::bytes(data).file_name(filename.clone());
        if !image.mime.is_empty() {
            part = part
                .mime_str(&image.mime)
                .map_err(|e| UploadError::InvalidPart {
                    filename: filename.clone(),
                    details: e.to_string(),
                })?;
        }
        let form = Form::new().part(FILES_FIELD, part);

        let endpoint = settings.upload_endpoint();
        info!("Uploading image to {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&settings.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let bytes = response.bytes().await?;
        let files: Vec<UploadedFile> =
            serde_json::from_slice(&bytes).map_err(UploadError::MalformedResponse)?;
        debug!("Upload response: {:?}", files);

        Ok(files)
    }
}

/// Keep at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is a long string", 7), "this is...");
        // Multi-byte characters are not split
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(
            "key",
            "http://127.0.0.1:9",
            dir.path().to_string_lossy().to_string(),
        );
        let image = ImageDescriptor {
            id: "missing".to_string(),
            title: "missing.png".to_string(),
            file_extension: "png".to_string(),
            mime: "image/png".to_string(),
        };

        let err = StrapiUploader::new()
            .upload(&settings, &image)
            .await
            .unwrap_err();
        match err {
            UploadError::FileNotFound { path } => assert!(path.ends_with("missing.png")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
