use crate::error::StoreError;

/// A single key-value storage area.
///
/// Areas are process-wide and shared between callers, so every method takes
/// `&self`; implementations serialize access internally. Each operation is
/// atomic on its own. Concurrent puts to the same key resolve as last write
/// wins.
///
/// Operations are synchronous: host storage calls are fast and never block
/// on the network.
pub trait StorageArea: Send + Sync {
  /// Get the raw value stored for `key`, or `None` if it is not set.
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Store `value` under `key`, overwriting any previous value.
  fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

  /// Remove `key`. Removing a key that is not set is not an error.
  fn remove(&self, key: &str) -> Result<(), StoreError>;

  /// All keys currently stored.
  ///
  /// The order is unspecified and may differ between calls.
  fn keys(&self) -> Result<Vec<String>, StoreError>;

  /// Remove every entry.
  fn clear(&self) -> Result<(), StoreError>;
}
