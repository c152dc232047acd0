use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a storage area.
///
/// Routine use never produces these; they indicate an environment-level
/// fault that callers should treat as unrecoverable.
#[derive(Debug, Error)]
pub enum StoreError {
  /// Writing the entry would exceed the area's byte quota.
  #[error("quota exceeded: {requested} bytes requested, limit is {limit}")]
  QuotaExceeded { limit: usize, requested: usize },

  /// Storage is disabled in this host.
  #[error("storage is disabled")]
  Disabled,

  /// The backing file could not be read or written.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The backing file exists but does not hold a string-to-string JSON object.
  #[error("corrupt storage file {}: {message}", path.display())]
  Corrupt { path: PathBuf, message: String },
}

impl StoreError {
  /// Create a corrupt-file error.
  pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self::Corrupt {
      path: path.into(),
      message: message.into(),
    }
  }
}
