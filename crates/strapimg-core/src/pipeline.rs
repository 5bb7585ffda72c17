//! The upload command
//!
//! Scans the selected note, then uploads and rewrites its images one at a
//! time, in note order. Only the two aggregate conditions (missing settings,
//! no images) reach the user as messages; per-image failures are logged and
//! recorded in the returned report.

use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::host::NoteHost;
use crate::models::{ImageDescriptor, UploadedFile};
use crate::notify::Notifier;
use crate::rewriter::{rewrite_note, RewriteOutcome};
use crate::scanner::scan_images;
use crate::uploader::StrapiUploader;

/// Shown when the API key or Strapi URL is blank
pub const MSG_MISSING_SETTINGS: &str =
    "Please set both the API key and Strapi URL in the settings.";

/// Shown when the note has no image attachments
pub const MSG_NO_IMAGES: &str = "No images found in the note.";

/// What happened to a single image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// Uploaded and the note now links to `url`
    Rewritten { url: String, replacements: usize },
    /// Uploaded, but the note had no matching link
    LinkNotFound { url: String },
    /// Upload failed
    UploadFailed { error: String },
    /// Upload response had no usable URL
    NoUrl,
    /// Uploaded, but updating the note failed
    RewriteFailed { url: String, error: String },
}

impl ImageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImageOutcome::Rewritten { .. })
    }
}

/// Per-image entry of a [`PipelineReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReport {
    pub image: ImageDescriptor,
    #[serde(flatten)]
    pub outcome: ImageOutcome,
}

/// Per-image results of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub images: Vec<ImageReport>,
}

impl PipelineReport {
    pub fn total(&self) -> usize {
        self.images.len()
    }

    pub fn succeeded(&self) -> usize {
        self.images.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// API key or Strapi URL missing, nothing was done
    MissingSettings,
    /// The note has no images
    NoImages,
    /// Every image was attempted
    Completed(PipelineReport),
}

/// Run scan → upload → rewrite over the selected note
pub async fn run_pipeline<H, N>(
    host: &H,
    uploader: &StrapiUploader,
    notifier: &N,
    settings: &Settings,
) -> PipelineOutcome
where
    H: NoteHost + ?Sized,
    N: Notifier + ?Sized,
{
    if !settings.is_complete() {
        notifier.show_message(MSG_MISSING_SETTINGS);
        return PipelineOutcome::MissingSettings;
    }

    info!("Fetching images from the note...");
    let images = scan_images(host).await;
    if images.is_empty() {
        notifier.show_message(MSG_NO_IMAGES);
        return PipelineOutcome::NoImages;
    }

    let mut report = PipelineReport::default();
    for image in images {
        info!("Uploading image: {}", image.title);
        let outcome = process_image(host, uploader, settings, &image).await;
        report.images.push(ImageReport { image, outcome });
    }

    info!(
        "Processed {} image(s): {} rewritten, {} skipped",
        report.total(),
        report.succeeded(),
        report.failed()
    );
    PipelineOutcome::Completed(report)
}

async fn process_image<H: NoteHost + ?Sized>(
    host: &H,
    uploader: &StrapiUploader,
    settings: &Settings,
    image: &ImageDescriptor,
) -> ImageOutcome {
    let files = match uploader.upload(settings, image).await {
        Ok(files) => files,
        Err(e) => {
            return ImageOutcome::UploadFailed {
                error: e.to_string(),
            }
        }
    };

    let Some(url) = UploadedFile::first_url(&files) else {
        info!("Upload of {} returned no URL, skipping", image.title);
        return ImageOutcome::NoUrl;
    };

    info!("Replacing link for image {} with {}", image.title, url);
    match rewrite_note(host, image, url, settings).await {
        Ok(RewriteOutcome::Rewritten { link, replacements }) => ImageOutcome::Rewritten {
            url: link,
            replacements,
        },
        Ok(RewriteOutcome::PatternNotFound) => ImageOutcome::LinkNotFound {
            url: url.to_string(),
        },
        Err(e) => ImageOutcome::RewriteFailed {
            url: url.to_string(),
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: Vec<ImageOutcome>) -> PipelineReport {
        PipelineReport {
            images: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| ImageReport {
                    image: ImageDescriptor {
                        id: format!("id{}", i),
                        title: format!("img{}.png", i),
                        file_extension: "png".to_string(),
                        mime: "image/png".to_string(),
                    },
                    outcome,
                })
                .collect(),
        }
    }

    #[test]
    fn test_report_counts() {
        let r = report(vec![
            ImageOutcome::Rewritten {
                url: "https://cms/a.png".to_string(),
                replacements: 1,
            },
            ImageOutcome::UploadFailed {
                error: "boom".to_string(),
            },
            ImageOutcome::NoUrl,
        ]);

        assert_eq!(r.total(), 3);
        assert_eq!(r.succeeded(), 1);
        assert_eq!(r.failed(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let r = report(vec![ImageOutcome::UploadFailed {
            error: "Upload rejected with status 500: oops".to_string(),
        }]);

        let json = serde_json::to_value(&r).unwrap();
        let entry = &json["images"][0];
        assert_eq!(entry["status"], "upload_failed");
        assert_eq!(entry["image"]["id"], "id0");
        assert!(entry["error"].as_str().unwrap().contains("500"));
    }
}
