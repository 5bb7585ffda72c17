//! Error types
//!
//! Each pipeline stage has its own error so the pipeline can record what
//! went wrong for an image without aborting the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors talking to the note application
#[derive(Error, Debug)]
pub enum HostError {
    /// Request could not be sent or the response not read
    #[error("Data API request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Data API answered with a non-success status
    #[error("Data API returned {status} for '{url}'")]
    Status { url: String, status: u16 },

    /// Response body did not have the expected shape
    #[error("Invalid Data API response from '{url}': {details}")]
    InvalidResponse { url: String, details: String },

    /// Requested item does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Errors uploading a single image
#[derive(Error, Debug)]
pub enum UploadError {
    /// Resource file is missing from the resources directory
    #[error("Resource file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Resource file exists but could not be read
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Multipart body could not be built
    #[error("Invalid multipart part for '{filename}': {details}")]
    InvalidPart { filename: String, details: String },

    /// Network failure
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Strapi answered with a non-success status
    #[error("Upload rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Success response that is not an array of uploaded files
    #[error("Malformed upload response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl UploadError {
    /// Create an error from an I/O error with path context
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => UploadError::FileNotFound { path },
            _ => UploadError::ReadFile {
                path,
                source: error,
            },
        }
    }
}

/// Errors rewriting a note
#[derive(Error, Debug)]
pub enum RewriteError {
    /// No note to rewrite
    #[error("Note not found")]
    NoteNotFound,

    /// The note has no body text
    #[error("Note {note_id} has no content")]
    EmptyBody { note_id: String },

    /// Link pattern could not be compiled
    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading or writing the note failed
    #[error(transparent)]
    Host(#[from] HostError),
}
