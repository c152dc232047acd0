use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::namespace::Namespace;
use crate::operation::Operation;

/// A single call as it crosses the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
  /// Namespace the caller was built against.
  pub namespace: String,

  /// Version the caller was built against.
  pub version: String,

  /// Function name, e.g. "local.get"
  pub function: String,

  /// Encoded argument; `null` for operations that take none.
  #[serde(default)]
  pub arg: Value,
}

impl Call {
  pub fn new(namespace: &Namespace, op: Operation, arg: Value) -> Self {
    Self {
      namespace: namespace.name.clone(),
      version: namespace.version.clone(),
      function: op.function_name(),
      arg,
    }
  }
}

/// Outcome of a call as it crosses back over the transport.
///
/// Encodes as `{"ok": <value>}` or `{"err": {"kind": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
  Ok(Value),
  Err(WireError),
}

impl From<Result<Value, WireError>> for Reply {
  fn from(result: Result<Value, WireError>) -> Self {
    match result {
      Ok(value) => Reply::Ok(value),
      Err(e) => Reply::Err(e),
    }
  }
}

impl From<Reply> for Result<Value, WireError> {
  fn from(reply: Reply) -> Self {
    match reply {
      Reply::Ok(value) => Ok(value),
      Reply::Err(e) => Err(e),
    }
  }
}

/// Kinds of failure a host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireErrorKind {
  /// The call names a namespace this host does not serve.
  NamespaceMismatch,
  /// The call targets a different version of the namespace.
  VersionMismatch,
  /// No function with that name is registered.
  UnknownFunction,
  /// The argument does not have the shape the function expects.
  InvalidArgument,
  /// The storage operation itself failed.
  Storage,
}

impl WireErrorKind {
  pub fn as_str(self) -> &'static str {
    match self {
      WireErrorKind::NamespaceMismatch => "namespace mismatch",
      WireErrorKind::VersionMismatch => "version mismatch",
      WireErrorKind::UnknownFunction => "unknown function",
      WireErrorKind::InvalidArgument => "invalid argument",
      WireErrorKind::Storage => "storage error",
    }
  }

  /// Whether caller and host disagree on the namespace/version/function triple.
  pub fn is_mismatch(self) -> bool {
    matches!(
      self,
      WireErrorKind::NamespaceMismatch
        | WireErrorKind::VersionMismatch
        | WireErrorKind::UnknownFunction
    )
  }
}

impl fmt::Display for WireErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error reported by the host for a single call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct WireError {
  pub kind: WireErrorKind,
  pub message: String,
}

impl WireError {
  pub fn new(kind: WireErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }

  pub fn invalid_argument(message: impl Into<String>) -> Self {
    Self::new(WireErrorKind::InvalidArgument, message)
  }

  pub fn storage(message: impl Into<String>) -> Self {
    Self::new(WireErrorKind::Storage, message)
  }
}
