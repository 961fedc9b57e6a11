//! Key-value ledger backends the contract runs on top of.

use crate::config::StorageBackend;
use crate::error::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

/// The keyed store the registry reads and writes.
///
/// Implementations guarantee that each `put_state` atomically replaces the
/// value at its key. Nothing more is assumed: there is no locking across
/// calls, so a read followed by a write is not isolated from other callers.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the bytes stored at `key`, or `None` when nothing is stored.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn delete_state(&self, key: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryLedger {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.read().await.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.state.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        self.state.write().await.remove(key);
        Ok(())
    }
}

/// File-per-key ledger.
///
/// Values live under `state/`, named by the hex SHA-256 of their key, and are
/// written through `tmp/` plus a rename so a reader never sees a half-written
/// value.
pub struct DiskLedger {
    base_path: PathBuf,
    _temp_dir: Option<tempfile::TempDir>,
}

impl DiskLedger {
    pub async fn new(path: PathBuf) -> Result<Self> {
        Self::prepare(&path).await?;

        Ok(Self {
            base_path: path,
            _temp_dir: None,
        })
    }

    pub async fn temp() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().to_path_buf();
        Self::prepare(&path).await?;

        Ok(Self {
            base_path: path,
            _temp_dir: Some(temp_dir),
        })
    }

    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Creates the layout and clears scratch files a crashed writer left behind.
    async fn prepare(path: &std::path::Path) -> Result<()> {
        fs::create_dir_all(path.join("state")).await?;
        fs::create_dir_all(path.join("tmp")).await?;

        let mut scratch = fs::read_dir(path.join("tmp")).await?;
        while let Some(entry) = scratch.next_entry().await? {
            debug!("Removing stale scratch file {}", entry.path().display());
            fs::remove_file(entry.path()).await?;
        }

        Ok(())
    }

    fn state_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.base_path.join("state").join(hex::encode(digest))
    }

    fn scratch_path(&self) -> PathBuf {
        self.base_path
            .join("tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl LedgerStore for DiskLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.state_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let scratch = self.scratch_path();
        let written = match fs::write(&scratch, &value).await {
            Ok(()) => fs::rename(&scratch, self.state_path(key)).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            fs::remove_file(&scratch).await.ok();
            return Err(e.into());
        }

        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.state_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub async fn create_storage(backend: &StorageBackend) -> Result<Arc<dyn LedgerStore>> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryLedger::new())),
        StorageBackend::TempDir => Ok(Arc::new(DiskLedger::temp().await?)),
        StorageBackend::Directory(path) => Ok(Arc::new(DiskLedger::new(path.clone()).await?)),
    }
}
