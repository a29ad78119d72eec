use crate::models::Record;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

pub const RECORD_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid date key: {0:?}")]
    InvalidKey(String),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One pretty-printed JSON document per date key, kept in a single directory.
///
/// There is no locking: two saves to the same key race and the last write wins.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the storage directory if it is missing.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: store.dir.clone(),
                source,
            })?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, date: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_key(date) {
            return Err(StoreError::InvalidKey(date.to_string()));
        }
        Ok(self.dir.join(format!("{date}.{RECORD_EXTENSION}")))
    }

    /// Returns the stored record, or an unsaved empty one when the date has no file.
    pub async fn load(&self, date: &str) -> Result<Record, StoreError> {
        let path = self.record_path(date)?;
        match fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode { path, source })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Record::empty(date)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Replaces the whole document for `date`.
    pub async fn save(&self, date: &str, record: &Record) -> Result<(), StoreError> {
        let path = self.record_path(date)?;
        let payload = to_pretty_json(record)?;
        fs::write(&path, payload)
            .await
            .map_err(|source| StoreError::Io { path, source })?;
        debug!(date, "record saved");
        Ok(())
    }
}

fn is_plain_key(date: &str) -> bool {
    !date.is_empty()
        && !date.starts_with('.')
        && !date.contains(['/', '\\', '"'])
        && !date.chars().any(char::is_control)
}

// serde_json writes non-ASCII as-is, which keeps Chinese text readable on disk.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut payload = serde_json::to_vec_pretty(value)?;
    payload.push(b'\n');
    Ok(payload)
}
