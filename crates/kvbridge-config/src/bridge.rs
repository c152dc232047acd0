use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::area::AreaConfig;

/// Error type for loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The file could not be read.
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The file is not a valid configuration.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
  /// Namespace to register under. Defaults to "kvbridge".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub namespace: Option<String>,

  /// Directory holding file-backed areas. Overridden by `--data-dir`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_dir: Option<PathBuf>,

  /// The area that survives across sessions.
  #[serde(default = "AreaConfig::default_local")]
  pub local: AreaConfig,

  /// The area scoped to the current session.
  #[serde(default = "AreaConfig::default_session")]
  pub session: AreaConfig,
}

impl Default for BridgeConfig {
  fn default() -> Self {
    Self {
      namespace: None,
      data_dir: None,
      local: AreaConfig::default_local(),
      session: AreaConfig::default_session(),
    }
  }
}

impl BridgeConfig {
  /// Load configuration from a JSON file.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}
