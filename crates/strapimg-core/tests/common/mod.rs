//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use strapimg_core::{HostError, Note, NoteHost, Notifier, Resource};

/// In-memory note application
#[derive(Default)]
pub struct MemoryHost {
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    note: Option<Note>,
    resources: Vec<Resource>,
    fail_listing: bool,
    note_reads: usize,
    listings: usize,
    writes: usize,
}

impl MemoryHost {
    pub fn with_note(body: &str) -> Self {
        let host = Self::default();
        host.state.lock().unwrap().note = Some(Note::new("note-1", body));
        host
    }

    pub fn without_note() -> Self {
        Self::default()
    }

    pub fn attach(self, id: &str, title: &str, ext: &str, mime: &str) -> Self {
        self.state.lock().unwrap().resources.push(Resource {
            id: id.to_string(),
            title: title.to_string(),
            file_extension: ext.to_string(),
            mime: mime.to_string(),
        });
        self
    }

    pub fn failing_listing(self) -> Self {
        self.state.lock().unwrap().fail_listing = true;
        self
    }

    pub fn body(&self) -> Option<String> {
        self.state.lock().unwrap().note.as_ref().map(|n| n.body.clone())
    }

    pub fn note_reads(&self) -> usize {
        self.state.lock().unwrap().note_reads
    }

    pub fn listings(&self) -> usize {
        self.state.lock().unwrap().listings
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

#[async_trait]
impl NoteHost for MemoryHost {
    async fn selected_note(&self) -> Result<Option<Note>, HostError> {
        let mut state = self.state.lock().unwrap();
        state.note_reads += 1;
        Ok(state.note.clone())
    }

    async fn note_resource_ids(&self, _note_id: &str) -> Result<Vec<String>, HostError> {
        let mut state = self.state.lock().unwrap();
        state.listings += 1;
        if state.fail_listing {
            return Err(HostError::Status {
                url: "memory://notes/resources".to_string(),
                status: 500,
            });
        }
        Ok(state.resources.iter().map(|r| r.id.clone()).collect())
    }

    async fn resource(&self, resource_id: &str) -> Result<Resource, HostError> {
        let state = self.state.lock().unwrap();
        state
            .resources
            .iter()
            .find(|r| r.id == resource_id)
            .cloned()
            .ok_or_else(|| HostError::NotFound {
                kind: "Resource",
                id: resource_id.to_string(),
            })
    }

    async fn update_note_body(&self, note_id: &str, body: &str) -> Result<(), HostError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        match state.note.as_mut() {
            Some(note) if note.id == note_id => {
                note.body = body.to_string();
                state.writes += 1;
                Ok(())
            }
            _ => Err(HostError::NotFound {
                kind: "Note",
                id: note_id.to_string(),
            }),
        }
    }
}

/// Notifier that remembers every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Write a fake resource blob `{id}.{ext}`
pub fn write_resource(dir: &Path, id: &str, ext: &str, contents: &[u8]) {
    std::fs::write(dir.join(format!("{}.{}", id, ext)), contents).unwrap();
}
