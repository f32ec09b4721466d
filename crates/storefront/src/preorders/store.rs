//! Pre-order persistence.
//!
//! [`PreorderStore`] is the seam between intake validation and storage. The
//! production implementation is [`JsonFileStore`], which keeps the whole
//! collection as a JSON array in a single file; [`MemoryStore`] keeps records
//! in process memory.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;

use super::PreorderRecord;

/// Errors raised by a pre-order store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pre-order file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("pre-order file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only storage for pre-order records.
pub trait PreorderStore: Send + Sync + 'static {
    /// Append one record to the end of the collection.
    fn append(
        &self,
        record: &PreorderRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All records, in the order they were appended.
    fn list_all(&self) -> impl Future<Output = Result<Vec<PreorderRecord>, StoreError>> + Send;
}

/// Stores the collection as a pretty-printed JSON array in one file.
///
/// Appends are a read-modify-write of the whole file. They are serialized
/// through a mutex, and each rewrite goes to a sibling temp file that is then
/// renamed over the original, so readers never observe a half-written array.
/// A missing or empty file is an empty collection.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<PreorderRecord>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, records: &[PreorderRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let body = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl PreorderStore for JsonFileStore {
    async fn append(&self, record: &PreorderRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        records.push(record.clone());
        self.write(&records).await?;
        tracing::debug!(path = %self.path.display(), total = records.len(), "Pre-order file rewritten");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PreorderRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.read().await
    }
}

/// Keeps records in memory. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PreorderRecord>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreorderStore for MemoryStore {
    async fn append(&self, record: &PreorderRecord) -> Result<(), StoreError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PreorderRecord>, StoreError> {
        Ok(self.records.lock().await.clone())
    }
}
