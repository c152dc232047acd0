use crate::area::StorageArea;
use crate::error::StoreError;

/// An area whose host has storage turned off.
///
/// Every operation, including reads, fails with [`StoreError::Disabled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledArea;

impl StorageArea for DisabledArea {
  fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
    Err(StoreError::Disabled)
  }

  fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
    Err(StoreError::Disabled)
  }

  fn remove(&self, _key: &str) -> Result<(), StoreError> {
    Err(StoreError::Disabled)
  }

  fn keys(&self) -> Result<Vec<String>, StoreError> {
    Err(StoreError::Disabled)
  }

  fn clear(&self) -> Result<(), StoreError> {
    Err(StoreError::Disabled)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_every_operation_fails() {
    let area = DisabledArea;

    assert!(matches!(area.get("key"), Err(StoreError::Disabled)));
    assert!(matches!(area.put("key", "value"), Err(StoreError::Disabled)));
    assert!(matches!(area.remove("key"), Err(StoreError::Disabled)));
    assert!(matches!(area.keys(), Err(StoreError::Disabled)));
    assert!(matches!(area.clear(), Err(StoreError::Disabled)));
  }
}
