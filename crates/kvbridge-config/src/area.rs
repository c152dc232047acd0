use serde::{Deserialize, Serialize};

/// How a storage area is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
  /// Entries live for the lifetime of the host process.
  Memory,
  /// Entries persist in a JSON file under the data directory.
  File,
  /// Storage is turned off; every operation fails.
  Disabled,
}

/// Configuration of one storage area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
  pub backend: Backend,

  /// Maximum bytes of keys and values together. Unlimited if not set.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quota_bytes: Option<usize>,
}

impl AreaConfig {
  pub fn new(backend: Backend) -> Self {
    Self {
      backend,
      quota_bytes: None,
    }
  }

  pub(crate) fn default_local() -> Self {
    Self::new(Backend::File)
  }

  pub(crate) fn default_session() -> Self {
    Self::new(Backend::Memory)
  }
}
