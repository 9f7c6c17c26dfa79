//! The response store - owns the collection and the duplicate-email rule
//!
//! The in-memory copy is authoritative. After every mutation the collection
//! is snapshotted to a JSON file under the data directory, and optionally
//! pushed to a remote save endpoint. Both writes are best-effort: failures
//! are logged and never surface to the caller.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::response::{Attendance, Response, Submission};

/// Storage namespace, kept from the original deployment so existing
/// snapshot files keep working
pub const STORE_NAMESPACE: &str = "yahavi-agm-responses";

/// Errors surfaced by [`ResponseStore::add`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A stored response already uses this email (case-insensitive)
    #[error("This email has already been registered")]
    DuplicateEmail,
}

/// Tally of stored responses by attendance intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total: usize,
    pub attending: usize,
    pub undecided: usize,
    pub not_attending: usize,
}

/// In-memory RSVP collection with a JSON snapshot on disk
///
/// Constructed once at startup and injected into the router state; nothing
/// in the application reaches for a global instance.
pub struct ResponseStore {
    responses: RwLock<Vec<Response>>,
    snapshot_path: PathBuf,
    mirror: Option<Mirror>,
}

impl ResponseStore {
    /// Open the store, loading the snapshot under `data_dir` if one exists
    ///
    /// Never fails: a missing or unreadable snapshot starts the store empty
    /// and logs the condition.
    pub async fn open(data_dir: impl AsRef<Path>, mirror_url: Option<String>) -> Self {
        let data_dir = data_dir.as_ref();
        if let Err(e) = tokio::fs::create_dir_all(data_dir).await {
            tracing::warn!(
                error = %e,
                path = %data_dir.display(),
                "Could not create data directory; snapshots will not persist"
            );
        }

        let snapshot_path = data_dir.join(format!("{}.json", STORE_NAMESPACE));
        let responses = load_snapshot(&snapshot_path).await;

        Self {
            responses: RwLock::new(responses),
            snapshot_path,
            mirror: mirror_url.map(Mirror::new),
        }
    }

    /// Snapshot of all stored responses, newest first
    pub async fn list(&self) -> Vec<Response> {
        self.responses.read().await.clone()
    }

    /// Insert a validated submission at the front of the collection
    ///
    /// Rejects the submission when a stored response already uses the same
    /// email, compared case-insensitively; the collection is untouched in
    /// that case. Assigns an id and submission time when the submission
    /// does not carry them, and returns the stored record.
    pub async fn add(&self, submission: Submission) -> Result<Response, StoreError> {
        let email = submission.email.to_lowercase();

        let mut responses = self.responses.write().await;
        if responses.iter().any(|r| r.email.to_lowercase() == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let response = Response {
            id: submission
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            full_flat_number: submission.unit.canonical(),
            unit: submission.unit,
            email,
            attendance: submission.attendance,
            submitted_at: submission.submitted_at.unwrap_or_else(Utc::now),
        };
        responses.insert(0, response.clone());

        let snapshot = responses.clone();
        drop(responses);
        self.persist(snapshot).await;

        Ok(response)
    }

    /// Lower-cased emails of all stored responses, for pre-validation
    pub async fn existing_emails(&self) -> HashSet<String> {
        self.responses
            .read()
            .await
            .iter()
            .map(|r| r.email.to_lowercase())
            .collect()
    }

    /// Tally the collection by attendance intent
    pub async fn stats(&self) -> AttendanceStats {
        let responses = self.responses.read().await;
        let mut stats = AttendanceStats {
            total: responses.len(),
            attending: 0,
            undecided: 0,
            not_attending: 0,
        };
        for response in responses.iter() {
            match response.attendance {
                Attendance::Attending => stats.attending += 1,
                Attendance::Undecided => stats.undecided += 1,
                Attendance::NotAttending => stats.not_attending += 1,
            }
        }
        stats
    }

    /// Administrative bulk-clear. Returns the number of removed responses.
    pub async fn clear(&self) -> usize {
        let mut responses = self.responses.write().await;
        let removed = responses.len();
        responses.clear();

        let snapshot = responses.clone();
        drop(responses);
        self.persist(snapshot).await;

        removed
    }

    /// Path of the snapshot file backing this store
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Write the snapshot file and kick off the mirror push. Errors are
    /// logged; the in-memory copy stays authoritative.
    async fn persist(&self, snapshot: Vec<Response>) {
        match serde_json::to_vec_pretty(&snapshot) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.snapshot_path, bytes).await {
                    tracing::warn!(
                        error = %e,
                        path = %self.snapshot_path.display(),
                        "Failed to write snapshot; keeping in-memory copy"
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize snapshot"),
        }

        if let Some(mirror) = &self.mirror {
            mirror.push(snapshot);
        }
    }
}

async fn load_snapshot(path: &Path) -> Vec<Response> {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Response>>(&bytes) {
            Ok(responses) => {
                tracing::info!(
                    count = responses.len(),
                    path = %path.display(),
                    "Loaded response snapshot"
                );
                responses
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Snapshot unreadable; starting with an empty collection"
                );
                Vec::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No snapshot found; starting fresh");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Snapshot unreadable; starting with an empty collection"
            );
            Vec::new()
        }
    }
}

/// Fire-and-forget push of the whole collection to a remote save endpoint
///
/// The push is spawned, never awaited by callers, and carries no retry. A
/// dead endpoint only costs a warning in the log.
struct Mirror {
    client: reqwest::Client,
    url: String,
}

impl Mirror {
    fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    fn push(&self, snapshot: Vec<Response>) {
        let client = self.client.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&snapshot).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(count = snapshot.len(), "Mirrored responses to save endpoint");
                }
                Ok(resp) => {
                    tracing::warn!(status = %resp.status(), "Save endpoint rejected mirror push");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Mirror push failed; keeping local copy only");
                }
            }
        });
    }
}
