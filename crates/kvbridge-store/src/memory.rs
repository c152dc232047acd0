use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::area::StorageArea;
use crate::error::StoreError;

/// In-memory storage area.
///
/// Entries live as long as the value does, which makes this the natural
/// backend for the session-scoped area. Also suitable for testing.
#[derive(Debug, Default)]
pub struct InMemoryArea {
  data: RwLock<HashMap<String, String>>,
  quota_bytes: Option<usize>,
}

impl InMemoryArea {
  pub fn new() -> Self {
    Self::default()
  }

  /// Create an area that rejects writes once keys and values together would
  /// take more than `quota_bytes` bytes.
  pub fn with_quota(quota_bytes: usize) -> Self {
    Self {
      data: RwLock::default(),
      quota_bytes: Some(quota_bytes),
    }
  }
}

impl StorageArea for InMemoryArea {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
    Ok(data.get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
    check_quota(self.quota_bytes, &data, key, value)?;
    data.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
    data.remove(key);
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>, StoreError> {
    let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
    Ok(data.keys().cloned().collect())
  }

  fn clear(&self) -> Result<(), StoreError> {
    let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
    data.clear();
    Ok(())
  }
}

/// Bytes an entry counts against a quota.
fn entry_size(key: &str, value: &str) -> usize {
  key.len() + value.len()
}

/// Fail if storing `key = value` in `data` would push it over `quota_bytes`.
pub(crate) fn check_quota(
  quota_bytes: Option<usize>,
  data: &HashMap<String, String>,
  key: &str,
  value: &str,
) -> Result<(), StoreError> {
  let Some(limit) = quota_bytes else {
    return Ok(());
  };

  let used: usize = data.iter().map(|(k, v)| entry_size(k, v)).sum();
  let replaced = data.get(key).map_or(0, |old| entry_size(key, old));
  let requested = used - replaced + entry_size(key, value);

  if requested > limit {
    return Err(StoreError::QuotaExceeded { limit, requested });
  }

  Ok(())
}
