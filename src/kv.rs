use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::io::AsyncWriteExt;

use crate::config::StoreConfig;
use crate::store::PersistenceError;

/// Longest key a `FileStore` will map to a file name.
pub const MAX_KEY_LEN: usize = 128;

/// Scoped string key-value store, the shape of browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Process-local store. Contents vanish with the process, like session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a data directory.
///
/// Writes go to `<key>.json.tmp`, are fsynced, then renamed over `<key>.json`,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, PersistenceError> {
        Self::open(&config.data_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Only keys made of `[A-Za-z0-9_-]` are accepted,
    /// so every key maps to its own file inside the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        if key.is_empty() {
            return Err(PersistenceError::Unavailable("empty storage key".into()));
        }
        if key.len() > MAX_KEY_LEN {
            return Err(PersistenceError::Unavailable("storage key too long".into()));
        }
        if let Some(bad) = key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(PersistenceError::Unavailable(format!(
                "storage key {key:?} contains {bad:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_and_swap(&tmp_path, &path, value).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Write `value` to `tmp_path`, fsync, then rename it over `path`.
async fn write_and_swap(tmp_path: &Path, path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp_path).await?;
    file.write_all(value.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(tmp_path, path).await
}
