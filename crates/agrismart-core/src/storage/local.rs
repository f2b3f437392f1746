use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::gate::{HydrationSource, PersistedState};
use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;

/// Persisted application state kept as one JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. A missing file is an empty state.
    pub async fn read(&self) -> Result<PersistedState> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No persisted state at {}; starting fresh", self.path.display());
                return Ok(PersistedState::new());
            }
            Err(e) => return Err(Error::io(e, "read_state", self.path.clone())),
        };

        let value: serde_json::Value = serde_json::from_str(&data)
            .map_err(|e| StorageSystemError::deserialization("json", e))?;
        match value {
            serde_json::Value::Object(map) => Ok(PersistedState::from_map(map)),
            _ => Err(StorageSystemError::StateNotAnObject { path: self.path.clone() }.into()),
        }
    }

    /// Write the state atomically: a temp file in the same directory is
    /// renamed over the target.
    pub fn persist(&self, state: &PersistedState) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| Error::io(e, "create_dir_all", parent.clone()))?;

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| StorageSystemError::serialization("json", e))?;
        let mut temp_file = NamedTempFile::new_in(&parent)
            .map_err(|e| Error::io(e, "create_temp_file", parent.clone()))?;
        temp_file
            .write_all(&json)
            .map_err(|e| Error::io(e, "write_temp_file", temp_file.path().to_path_buf()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| Error::io(e.error, "persist_state", self.path.clone()))?;
        log::debug!("Persisted {} key(s) to {}", state.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl HydrationSource for FileStateStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<PersistedState> {
        self.read().await
    }
}
