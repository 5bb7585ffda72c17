//! Note application seam
//!
//! [`NoteHost`] is everything the pipeline needs from the note application.
//! [`JoplinClient`] implements it over the Joplin Data API served by the
//! desktop app's Web Clipper service.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::HostError;
use crate::models::{ItemId, Note, Page, Resource};

/// Fields requested for notes
const NOTE_FIELDS: &str = "id,body";

/// Fields requested for resources
const RESOURCE_FIELDS: &str = "id,title,file_extension,mime";

/// Reply of the `/ping` endpoint
const PING_REPLY: &str = "JoplinClipperServer";

/// Data access the pipeline needs from the note application
#[async_trait]
pub trait NoteHost: Send + Sync {
    /// The note the command runs against, if any
    ///
    /// Fetched fresh on every call.
    async fn selected_note(&self) -> Result<Option<Note>, HostError>;

    /// Ids of the resources attached to a note, in host order
    async fn note_resource_ids(&self, note_id: &str) -> Result<Vec<String>, HostError>;

    /// Metadata of a single resource
    async fn resource(&self, resource_id: &str) -> Result<Resource, HostError>;

    /// Replace a note's body
    async fn update_note_body(&self, note_id: &str, body: &str) -> Result<(), HostError>;
}

/// Client for the Joplin Data API
pub struct JoplinClient {
    base_url: String,
    token: Option<String>,
    /// Note to work on; the most recently edited note when unset
    note_id: Option<String>,
    client: reqwest::Client,
}

impl JoplinClient {
    /// Create a client for the Data API at `base_url`
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            note_id: None,
            client: reqwest::Client::new(),
        }
    }

    /// Pin the selected note to a specific id
    pub fn with_note(mut self, note_id: Option<String>) -> Self {
        self.note_id = note_id;
        self
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the Data API is reachable
    pub async fn ping(&self) -> Result<bool, HostError> {
        let url = self.url("/ping");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| HostError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let text = response
            .text()
            .await
            .map_err(|source| HostError::Request { url, source })?;
        Ok(text.trim() == PING_REPLY)
    }

    async fn note(&self, note_id: &str) -> Result<Option<Note>, HostError> {
        let path = format!("/notes/{}", note_id);
        match self.get_json::<Note>(&path, &[("fields", NOTE_FIELDS)]).await {
            Ok(note) => Ok(Some(note)),
            Err(HostError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn latest_note(&self) -> Result<Option<Note>, HostError> {
        let page: Page<Note> = self
            .get_json(
                "/notes",
                &[
                    ("fields", NOTE_FIELDS),
                    ("order_by", "updated_time"),
                    ("order_dir", "DESC"),
                    ("limit", "1"),
                ],
            )
            .await?;
        Ok(page.items.into_iter().next())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.query(&[("token", token.as_str())]),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HostError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .request(reqwest::Method::GET, &url)
            .query(query)
            .send()
            .await
            .map_err(|source| HostError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| HostError::Request {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|e| HostError::InvalidResponse {
            url,
            details: e.to_string(),
        })
    }
}

#[async_trait]
impl NoteHost for JoplinClient {
    async fn selected_note(&self) -> Result<Option<Note>, HostError> {
        match &self.note_id {
            Some(id) => self.note(id).await,
            None => self.latest_note().await,
        }
    }

    async fn note_resource_ids(&self, note_id: &str) -> Result<Vec<String>, HostError> {
        let path = format!("/notes/{}/resources", note_id);
        let mut ids = Vec::new();
        let mut page_number = 1u32;

        loop {
            let page_param = page_number.to_string();
            let page: Page<ItemId> = self
                .get_json(&path, &[("fields", "id"), ("page", page_param.as_str())])
                .await?;
            // An empty page ends the listing even if has_more is set
            let exhausted = page.items.is_empty() || !page.has_more;
            ids.extend(page.items.into_iter().map(|item| item.id));
            if exhausted {
                break;
            }
            page_number += 1;
        }

        Ok(ids)
    }

    async fn resource(&self, resource_id: &str) -> Result<Resource, HostError> {
        let path = format!("/resources/{}", resource_id);
        match self
            .get_json::<Resource>(&path, &[("fields", RESOURCE_FIELDS)])
            .await
        {
            Err(HostError::Status { status: 404, .. }) => Err(HostError::NotFound {
                kind: "Resource",
                id: resource_id.to_string(),
            }),
            other => other,
        }
    }

    async fn update_note_body(&self, note_id: &str, body: &str) -> Result<(), HostError> {
        let url = self.url(&format!("/notes/{}", note_id));
        debug!("PUT {}", url);

        let response = self
            .request(reqwest::Method::PUT, &url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(|source| HostError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        match status.as_u16() {
            _ if status.is_success() => Ok(()),
            404 => Err(HostError::NotFound {
                kind: "Note",
                id: note_id.to_string(),
            }),
            code => Err(HostError::Status { url, status: code }),
        }
    }
}
