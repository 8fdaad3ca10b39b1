//! Version history of rendered documents.
//!
//! The renderer itself is stateless; the surrounding service keeps an
//! append-only list of rendered versions per document id behind this trait so
//! storage can be swapped without touching the rendering core. Callers must
//! serialize writes to the same document id themselves.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// One stored version of a document
#[derive(Debug, Clone, PartialEq)]
pub struct VersionEntry {
    pub version_id: String,
    pub created_at: DateTime<Utc>,
    pub change_note: String,
    /// The rendered document at that point, directive-free HTML
    pub html: String,
}

impl VersionEntry {
    pub fn new(version_id: impl Into<String>, change_note: impl Into<String>, html: impl Into<String>) -> Self {
        VersionEntry {
            version_id: version_id.into(),
            created_at: Utc::now(),
            change_note: change_note.into(),
            html: html.into(),
        }
    }
}

/// Append-only version storage keyed by document id
pub trait VersionStore: Send + Sync {
    /// All stored versions for a document, oldest first
    fn get(&self, document_id: &str) -> Vec<VersionEntry>;
    /// Appends one version to a document's history
    fn append(&self, document_id: &str, entry: VersionEntry);
}

/// The in-memory stand-in used until real persistence lands
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    versions: Mutex<HashMap<String, Vec<VersionEntry>>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VersionStore for InMemoryVersionStore {
    fn get(&self, document_id: &str) -> Vec<VersionEntry> {
        let versions = self.versions.lock().expect("version store lock poisoned");
        versions.get(document_id).cloned().unwrap_or_default()
    }

    fn append(&self, document_id: &str, entry: VersionEntry) {
        let mut versions = self.versions.lock().expect("version store lock poisoned");
        versions.entry(document_id.to_string()).or_default().push(entry);
    }
}
