//! Document persistence for the portfolio collections.
//!
//! Each collection ("projects", "testimonials") is one JSON document in the
//! data directory, owned exclusively by a [`DocumentStore`] handle. Handlers
//! never touch the files directly; they go through the repositories in
//! [`projects`] and [`testimonials`], which express CRUD as mutations over
//! the store.
//!
//! # Persistence discipline
//!
//! - Writes are serialized per store by an async mutex; stores for different
//!   collections are independent.
//! - A mutation is applied to a scratch copy of the document, persisted to a
//!   temporary sibling file, and renamed over the live file. The live file is
//!   never truncated in place, so a crash mid-write leaves the previous
//!   committed document intact.
//! - A file that fails to parse at open falls back to the default document
//!   (with a warning) rather than poisoning every request.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

pub mod projects;
pub mod testimonials;

pub use projects::ProjectRepository;
pub use testimonials::TestimonialRepository;

/// Upper bound on a single persist. A disk that stalls longer than this
/// fails the triggering request instead of hanging it.
const PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the document store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persist did not complete within [`PERSIST_TIMEOUT`].
    #[error("storage write timed out after {0:?}")]
    Timeout(Duration),

    /// The in-memory document failed to serialize.
    #[error("document encoding failed: {0}")]
    Encode(serde_json::Error),

    /// On-disk content is not a valid document. Recovered at open by
    /// falling back to the default document; never surfaced to a request.
    #[error("document on disk is corrupt: {0}")]
    Corrupt(serde_json::Error),
}

/// Errors from the repository layer on top of the store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Entity payload failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// A typed, file-backed JSON document shared by request handlers.
///
/// Cheaply cloneable; all clones point at the same document and the same
/// write lock.
#[derive(Debug)]
pub struct DocumentStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for DocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
struct StoreInner<T> {
    name: String,
    path: PathBuf,
    document: Mutex<T>,
}

impl<T> DocumentStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + 'static,
{
    /// Open (or initialize) the document for `name` under `data_dir`.
    ///
    /// The backing file is `<data_dir>/<name>.json`. A missing file is
    /// initialized with `default` and persisted before the handle is
    /// returned; an unparsable file is replaced by `default` with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the data directory or file cannot be
    /// created, read, or written.
    pub async fn open(data_dir: &Path, name: &str, default: T) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(format!("{name}.json"));

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<T>(&bytes) {
                Ok(document) => document,
                Err(source) => {
                    tracing::warn!(
                        store = name,
                        error = %StoreError::Corrupt(source),
                        "document failed to parse, reinitializing with the default"
                    );
                    persist(&path, &default).await?;
                    default
                }
            },
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                persist(&path, &default).await?;
                default
            }
            Err(source) => return Err(StoreError::Io(source)),
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                name: name.to_owned(),
                path,
                document: Mutex::new(document),
            }),
        })
    }

    /// Snapshot of the current document.
    ///
    /// Concurrent readers observe either the pre- or post-mutation state of
    /// any in-flight write, never a partial one.
    pub async fn read(&self) -> T {
        self.inner.document.lock().await.clone()
    }

    /// Apply `mutate` to the document and persist the result atomically.
    ///
    /// The mutator runs against a scratch copy. If it fails, nothing is
    /// persisted and the in-memory document is untouched. The write lock is
    /// scoped to this call and released on every exit path, including
    /// cancellation mid-persist; the in-memory document only changes after
    /// the file rename has succeeded.
    ///
    /// # Errors
    ///
    /// Returns whatever error the mutator produced, or a converted
    /// [`StoreError`] if serialization or persistence failed.
    pub async fn write<R, E, F>(&self, mutate: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut guard = self.inner.document.lock().await;

        let mut next = guard.clone();
        let out = mutate(&mut next)?;

        match tokio::time::timeout(PERSIST_TIMEOUT, persist(&self.inner.path, &next)).await {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(E::from(source)),
            Err(_) => return Err(E::from(StoreError::Timeout(PERSIST_TIMEOUT))),
        }

        *guard = next;
        Ok(out)
    }

    /// Collection name this store was opened with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

/// Serialize `document` and atomically replace the live file.
///
/// Written to a uniquely named temporary sibling first, then renamed over
/// the live path, so no reader of the file ever observes a partial write.
async fn persist<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(document).map_err(StoreError::Encode)?;

    let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    tokio::fs::write(&tmp, payload).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    struct TestDocument {
        items: Vec<String>,
    }

    fn doc(items: &[&str]) -> TestDocument {
        TestDocument {
            items: items.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn test_open_initializes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let default = doc(&["seed"]);

        let store = DocumentStore::open(dir.path(), "things", default.clone())
            .await
            .unwrap();

        assert_eq!(store.read().await, default);
        assert!(store.path().exists());
        assert_eq!(store.path().file_name().unwrap(), "things.json");
    }

    #[tokio::test]
    async fn test_open_loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = DocumentStore::open(dir.path(), "things", doc(&[]))
                .await
                .unwrap();
            store
                .write(|d: &mut TestDocument| {
                    d.items.push("kept".to_string());
                    Ok::<_, StoreError>(())
                })
                .await
                .unwrap();
        }

        // Reopen with a different default; the persisted state wins.
        let store = DocumentStore::open(dir.path(), "things", doc(&["ignored"]))
            .await
            .unwrap();
        assert_eq!(store.read().await, doc(&["kept"]));
    }

    #[tokio::test]
    async fn test_open_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("things.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let default = doc(&["fallback"]);
        let store = DocumentStore::open(dir.path(), "things", default.clone())
            .await
            .unwrap();

        assert_eq!(store.read().await, default);

        // The default is re-persisted, so the next open parses cleanly.
        let bytes = tokio::fs::read(&path).await.unwrap();
        let on_disk: TestDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(on_disk, default);
    }

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "things", doc(&["a", "b"]))
            .await
            .unwrap();

        let before = store.read().await;
        store
            .write(|_d: &mut TestDocument| Ok::<_, StoreError>(()))
            .await
            .unwrap();

        assert_eq!(store.read().await, before);
    }

    #[tokio::test]
    async fn test_write_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "things", doc(&[]))
            .await
            .unwrap();

        store
            .write(|d: &mut TestDocument| {
                d.items.push("persisted".to_string());
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();

        let bytes = tokio::fs::read(store.path()).await.unwrap();
        let on_disk: TestDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(on_disk, doc(&["persisted"]));
    }

    #[tokio::test]
    async fn test_failed_mutator_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "things", doc(&["original"]))
            .await
            .unwrap();

        let result: Result<(), RepositoryError> = store
            .write(|d: &mut TestDocument| {
                d.items.clear();
                Err(RepositoryError::NotFound)
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(store.read().await, doc(&["original"]));

        let bytes = tokio::fs::read(store.path()).await.unwrap();
        let on_disk: TestDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(on_disk, doc(&["original"]));
    }

    #[tokio::test]
    async fn test_concurrent_writes_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "things", doc(&[]))
            .await
            .unwrap();

        let a = store.clone();
        let b = store.clone();
        let (ra, rb) = tokio::join!(
            a.write(|d: &mut TestDocument| {
                d.items.push("first".to_string());
                Ok::<_, StoreError>(())
            }),
            b.write(|d: &mut TestDocument| {
                d.items.push("second".to_string());
                Ok::<_, StoreError>(())
            }),
        );
        ra.unwrap();
        rb.unwrap();

        let final_doc = store.read().await;
        assert_eq!(final_doc.items.len(), 2);
        assert!(final_doc.items.contains(&"first".to_string()));
        assert!(final_doc.items.contains(&"second".to_string()));
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path(), "things", doc(&[]))
            .await
            .unwrap();

        store
            .write(|d: &mut TestDocument| {
                d.items.push("x".to_string());
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["things.json".to_string()]);
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let left = DocumentStore::open(dir.path(), "left", doc(&[]))
            .await
            .unwrap();
        let right = DocumentStore::open(dir.path(), "right", doc(&[]))
            .await
            .unwrap();

        left.write(|d: &mut TestDocument| {
            d.items.push("only-left".to_string());
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();

        assert_eq!(right.read().await, doc(&[]));
    }
}
