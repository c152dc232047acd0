use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::area::StorageArea;
use crate::error::StoreError;
use crate::memory::check_quota;

/// File-backed storage area.
///
/// The whole area is one JSON object on disk:
/// ```text
/// {root}/
/// └── local.json    {"theme": "\"dark\"", "draft": "{...}"}
/// ```
///
/// The file is read once on open. Every mutation rewrites it through a
/// uniquely named temporary file in the same directory and a rename, so a
/// crash never leaves a half-written area and concurrent writers never share
/// a temporary file.
/// A mutation whose write fails is rolled back in memory.
#[derive(Debug)]
pub struct FsArea {
  path: PathBuf,
  data: RwLock<HashMap<String, String>>,
  quota_bytes: Option<usize>,
}

impl FsArea {
  /// Open the area stored at `path`. A missing file is an empty area.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
    let path = path.into();
    let data = Self::load(&path)?;
    debug!(path = %path.display(), entries = data.len(), "opened storage area");

    Ok(Self {
      path,
      data: RwLock::new(data),
      quota_bytes: None,
    })
  }

  /// Limit keys and values together to `quota_bytes` bytes.
  pub fn with_quota(mut self, quota_bytes: usize) -> Self {
    self.quota_bytes = Some(quota_bytes);
    self
  }

  fn load(path: &Path) -> Result<HashMap<String, String>, StoreError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
      Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&content).map_err(|e| StoreError::corrupt(path, e.to_string()))
  }

  fn persist(&self, data: &HashMap<String, String>) -> Result<(), StoreError> {
    let dir = match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let content =
      serde_json::to_vec(data).map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;

    // Uniquely named per write, and removed on drop if the rename never happens.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&content)?;
    tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
  }
}

impl StorageArea for FsArea {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
    Ok(data.get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
    check_quota(self.quota_bytes, &data, key, value)?;

    let previous = data.insert(key.to_string(), value.to_string());
    if let Err(e) = self.persist(&data) {
      match previous {
        Some(old) => data.insert(key.to_string(), old),
        None => data.remove(key),
      };
      return Err(e);
    }

    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);

    // Nothing to write back for a key that is not there.
    let Some(previous) = data.remove(key) else {
      return Ok(());
    };

    if let Err(e) = self.persist(&data) {
      data.insert(key.to_string(), previous);
      return Err(e);
    }

    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>, StoreError> {
    let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
    Ok(data.keys().cloned().collect())
  }

  fn clear(&self) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
    let previous = std::mem::take(&mut *data);

    if let Err(e) = self.persist(&data) {
      *data = previous;
      return Err(e);
    }

    Ok(())
  }
}
