//! Persistence glue
//!
//! The editing core never performs I/O on its own. Saving goes through a
//! [`PersistenceAdapter`] supplied by the embedding application; the
//! [`SaveCoordinator`] makes sure only one save per session is in flight and
//! tracks which document revision was last saved.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{Block, Document, DocumentError};

// ── Payload ─────────────────────────────────────────────────────────────────

/// Persisted page content, `{ "blocks": [...] }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Body handed to the adapter on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub content: PageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub publish: bool,
}

impl SavePayload {
    pub fn new(document: &Document) -> Self {
        Self {
            content: PageContent {
                blocks: document.blocks.clone(),
            },
            meta_title: None,
            meta_description: None,
            publish: false,
        }
    }

    pub fn with_meta(mut self, title: Option<String>, description: Option<String>) -> Self {
        self.meta_title = title;
        self.meta_description = description;
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// The saved blocks as a document
    pub fn document(&self) -> Document {
        Document::new(self.content.blocks.clone())
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Save/load failures, the only user-facing errors of an editing session
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The backend refused the save
    #[error("Save rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Anything the adapter's transport reports
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

impl PersistenceError {
    /// Whether trying the same save again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            PersistenceError::Rejected { status, .. } => *status >= 500 || *status == 429,
            PersistenceError::Io(_) | PersistenceError::Transport(_) => true,
            PersistenceError::Serialization(_) | PersistenceError::Document(_) => false,
        }
    }
}

// ── Adapter ─────────────────────────────────────────────────────────────────

/// Storage backend of a page
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    async fn save(&self, payload: &SavePayload) -> Result<(), PersistenceError>;

    /// Last saved document, `None` when nothing was saved yet
    async fn load(&self) -> Result<Option<Document>, PersistenceError>;
}

/// Adapter writing the payload as JSON to one file
///
/// File access is plain blocking `std::fs` run on the calling task, so this
/// adapter suits tests, local tools and small pages. On a shared async
/// runtime, wrap calls in `spawn_blocking` or use a non-blocking adapter.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceAdapter for JsonFileStore {
    async fn save(&self, payload: &SavePayload) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(payload)?;
        // Write then rename so a failed write never truncates the last save.
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<Document>, PersistenceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let payload: SavePayload = serde_json::from_slice(&bytes)?;
        let document = Document::from_value(serde_json::to_value(&payload.content)?)?;
        Ok(Some(document))
    }
}

/// In-memory adapter keeping every payload it accepted
#[derive(Default)]
pub struct MemoryStore {
    saves: Mutex<Vec<SavePayload>>,
    failures: Mutex<Vec<PersistenceError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next save fail with `error`
    pub fn fail_next(&self, error: PersistenceError) {
        self.failures.lock().push(error);
    }

    pub fn saves(&self) -> Vec<SavePayload> {
        self.saves.lock().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().len()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryStore {
    async fn save(&self, payload: &SavePayload) -> Result<(), PersistenceError> {
        if let Some(error) = self.failures.lock().pop() {
            return Err(error);
        }
        self.saves.lock().push(payload.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Document>, PersistenceError> {
        Ok(self.saves.lock().last().map(SavePayload::document))
    }
}

// ── Coordinator ─────────────────────────────────────────────────────────────

/// Handle for one in-flight save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    /// Document revision captured in the payload
    pub revision: u64,
    pub publish: bool,
}

/// Single-flight save bookkeeping
#[derive(Debug, Clone, Default)]
pub struct SaveCoordinator {
    in_flight: Option<SaveTicket>,
    saved_revision: u64,
    published: bool,
    last_error: Option<String>,
}

impl SaveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the save slot for `revision`; `None` while a save is in flight
    pub fn begin(&mut self, revision: u64, publish: bool) -> Option<SaveTicket> {
        if self.in_flight.is_some() {
            info!(revision, "save already in flight, request coalesced");
            return None;
        }
        let ticket = SaveTicket { revision, publish };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Release the slot with the adapter's result
    ///
    /// A failure leaves the saved revision untouched, so the session stays
    /// dirty and the save can be retried.
    pub fn finish(&mut self, ticket: SaveTicket, result: Result<(), PersistenceError>) -> Result<(), PersistenceError> {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        match result {
            Ok(()) => {
                self.saved_revision = self.saved_revision.max(ticket.revision);
                self.published |= ticket.publish;
                self.last_error = None;
                info!(revision = ticket.revision, publish = ticket.publish, "page saved");
                Ok(())
            }
            Err(err) => {
                warn!(revision = ticket.revision, error = %err, retryable = err.is_retryable(), "save failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether `revision` has edits that were never saved
    pub fn is_dirty(&self, revision: u64) -> bool {
        revision != self.saved_revision
    }

    pub fn saved_revision(&self) -> u64 {
        self.saved_revision
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Treat `revision` as saved (document freshly loaded from storage)
    pub fn mark_saved(&mut self, revision: u64) {
        self.saved_revision = revision;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let document = Document::from_value(json!({
            "blocks": [{ "id": "a", "type": "text", "content": {}, "settings": {} }]
        }))
        .unwrap();
        let payload = SavePayload::new(&document)
            .with_meta(Some("Accueil".into()), None)
            .publish(true);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "content": { "blocks": [{ "id": "a", "type": "text", "content": {}, "settings": {} }] },
                "metaTitle": "Accueil",
                "publish": true
            })
        );
    }

    #[test]
    fn test_single_flight() {
        let mut saves = SaveCoordinator::new();
        let ticket = saves.begin(3, false).unwrap();
        assert!(saves.begin(4, false).is_none());
        assert!(saves.is_saving());

        saves.finish(ticket, Ok(())).unwrap();
        assert!(!saves.is_saving());
        assert!(!saves.is_dirty(3));
        assert!(saves.is_dirty(4));
    }

    #[test]
    fn test_failure_keeps_dirty() {
        let mut saves = SaveCoordinator::new();
        let ticket = saves.begin(2, true).unwrap();
        let err = saves
            .finish(
                ticket,
                Err(PersistenceError::Rejected {
                    status: 503,
                    message: "maintenance".into(),
                }),
            )
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(saves.is_dirty(2));
        assert!(!saves.is_published());
        assert!(saves.last_error().unwrap().contains("maintenance"));
        assert!(saves.begin(2, true).is_some(), "slot released after failure");
    }

    #[test]
    fn test_retryable_classification() {
        let rejected = |status| PersistenceError::Rejected {
            status,
            message: String::new(),
        };
        assert!(!rejected(400).is_retryable());
        assert!(rejected(429).is_retryable());
        assert!(PersistenceError::Transport(anyhow::anyhow!("offline")).is_retryable());
    }

    #[tokio::test]
    async fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("page.json"));
        assert!(store.load().await.unwrap().is_none());

        let document = Document::from_value(json!({
            "blocks": [{ "id": "h", "type": "hero", "content": { "title": "Salut" }, "settings": { "padding": { "top": 40 } } }]
        }))
        .unwrap();
        store.save(&SavePayload::new(&document)).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.fail_next(PersistenceError::Transport(anyhow::anyhow!("offline")));
        let payload = SavePayload::new(&Document::default());
        assert!(store.save(&payload).await.is_err());
        assert!(store.save(&payload).await.is_ok());
        assert_eq!(store.save_count(), 1);
    }
}
