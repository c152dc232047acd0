use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::wire::{Call, Reply};

/// Errors raised by a transport before a reply could be obtained.
#[derive(Debug, Error)]
pub enum TransportError {
  /// The other side is gone.
  #[error("transport closed")]
  Closed,

  /// The call was accepted but never completed.
  #[error("call dropped: {message}")]
  Dropped { message: String },

  /// A frame could not be encoded or decoded.
  #[error("malformed frame: {message}")]
  Frame { message: String },

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl TransportError {
  pub fn dropped(message: impl Into<String>) -> Self {
    Self::Dropped {
      message: message.into(),
    }
  }

  pub fn frame(message: impl Into<String>) -> Self {
    Self::Frame {
      message: message.into(),
    }
  }
}

/// Cross-boundary call mechanism.
///
/// A transport delivers one [`Call`] to the host and hands back exactly one
/// [`Reply`], or an error if the call never reached the host or its reply
/// never came back.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn call(&self, call: Call) -> Result<Reply, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
  async fn call(&self, call: Call) -> Result<Reply, TransportError> {
    (**self).call(call).await
  }
}
