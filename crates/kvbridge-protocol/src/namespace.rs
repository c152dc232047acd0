use std::fmt;

use crate::operation::Operation;

/// Namespace the bridge registers under unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "kvbridge";

/// Version of the interop contract. Host and caller must agree on it exactly.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity a set of registered functions lives under.
///
/// Several interop packages can share one host as long as their namespaces
/// differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
  /// Package name, e.g. "kvbridge"
  pub name: String,

  /// Semantic version string, e.g. "0.1.0"
  pub version: String,
}

impl Namespace {
  pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
    }
  }

  /// The given package name at the current protocol version.
  pub fn named(name: impl Into<String>) -> Self {
    Self::new(name, PROTOCOL_VERSION)
  }

  /// Fully qualified function name.
  /// Example: "kvbridge@0.1.0/local.get"
  pub fn qualify(&self, op: Operation) -> String {
    format!("{}/{}", self, op)
  }
}

impl Default for Namespace {
  fn default() -> Self {
    Self::named(DEFAULT_NAMESPACE)
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.name, self.version)
  }
}
