//! Client error types.

use kvbridge_protocol::{Operation, TransportError, WireError};

/// Broad category of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Caller and host disagree on namespace, version or function name.
  Mismatch,
  /// The host ran the call and it failed.
  Host,
  /// The host's result does not have the expected shape.
  Decode,
  /// A caller-side value could not be encoded, so nothing was sent.
  Encode,
  /// The call never reached the host, or its reply never came back.
  Transport,
}

/// Errors returned by facade operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
  /// Caller and host were built against different contracts. Not worth retrying.
  #[error("{op}: {source}")]
  Mismatch {
    op: Operation,
    #[source]
    source: WireError,
  },

  /// Host execution fault, e.g. quota exceeded or storage disabled.
  #[error("{op}: {source}")]
  Host {
    op: Operation,
    #[source]
    source: WireError,
  },

  /// The result could not be decoded into the operation's result type.
  #[error("{op}: failed to decode result: {message}")]
  Decode { op: Operation, message: String },

  /// A value could not be serialized before sending.
  #[error("{op}: failed to encode value: {message}")]
  Encode { op: Operation, message: String },

  /// The transport failed.
  #[error("{op}: {source}")]
  Transport {
    op: Operation,
    #[source]
    source: TransportError,
  },
}

impl ClientError {
  /// Classify a host error reply.
  pub(crate) fn from_wire(op: Operation, source: WireError) -> Self {
    if source.kind.is_mismatch() {
      Self::Mismatch { op, source }
    } else {
      Self::Host { op, source }
    }
  }

  pub(crate) fn decode(op: Operation, message: impl Into<String>) -> Self {
    Self::Decode {
      op,
      message: message.into(),
    }
  }

  pub(crate) fn encode(op: Operation, message: impl Into<String>) -> Self {
    Self::Encode {
      op,
      message: message.into(),
    }
  }

  /// The operation that failed.
  pub fn operation(&self) -> Operation {
    match self {
      Self::Mismatch { op, .. }
      | Self::Host { op, .. }
      | Self::Decode { op, .. }
      | Self::Encode { op, .. }
      | Self::Transport { op, .. } => *op,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Mismatch { .. } => ErrorKind::Mismatch,
      Self::Host { .. } => ErrorKind::Host,
      Self::Decode { .. } => ErrorKind::Decode,
      Self::Encode { .. } => ErrorKind::Encode,
      Self::Transport { .. } => ErrorKind::Transport,
    }
  }
}
