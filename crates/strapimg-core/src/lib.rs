//! strapimg Core Library
//!
//! Moves the images embedded in a Joplin note to a Strapi media library and
//! points the note at the hosted copies.
//!
//! # Architecture
//!
//! One linear pass per invocation:
//!
//! ```text
//! scanner ──> [ImageDescriptor] ──> for each: uploader ──> rewriter
//! ```
//!
//! The note application is reached through the [`NoteHost`] trait, user
//! facing messages through [`Notifier`]. [`JoplinClient`] implements the host
//! on top of the Joplin Data API.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let host = JoplinClient::new(&config.joplin_url, config.joplin_token.clone());
//! let uploader = StrapiUploader::new();
//! let report = run_pipeline(&host, &uploader, &notifier, &config.settings()).await;
//! ```
//!
//! # Modules
//!
//! - `config`: Application configuration and the upload `Settings`
//! - `models`: Notes, resources, image descriptors and upload results
//! - `host`: Note application seam and the Joplin Data API client
//! - `scanner`: Finds image attachments on the selected note
//! - `uploader`: Multipart uploads to Strapi
//! - `rewriter`: Swaps internal image links for hosted URLs
//! - `pipeline`: The scan → upload → rewrite command
//! - `paths`: Home directory expansion and resource file paths
//! - `notify`: User-facing message seam

pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod notify;
pub mod paths;
pub mod pipeline;
pub mod rewriter;
pub mod scanner;
pub mod uploader;

pub use config::{Config, SettingSpec, Settings, SETTINGS, SETTINGS_SECTION};
pub use error::{HostError, RewriteError, UploadError};
pub use host::{JoplinClient, NoteHost};
pub use models::{ImageDescriptor, Note, Resource, UploadedFile};
pub use notify::Notifier;
pub use pipeline::{
    run_pipeline, ImageOutcome, ImageReport, PipelineOutcome, PipelineReport,
    MSG_MISSING_SETTINGS, MSG_NO_IMAGES,
};
pub use rewriter::{rewrite_note, RewriteOutcome};
pub use scanner::scan_images;
pub use uploader::StrapiUploader;
