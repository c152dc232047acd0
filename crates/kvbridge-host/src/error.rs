use thiserror::Error;

/// Errors that stop a host server loop.
///
/// Failures of individual calls never end up here; they are answered with an
/// error reply instead.
#[derive(Debug, Error)]
pub enum HostError {
  /// Reading a call or writing a reply failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// A reply could not be encoded.
  #[error("failed to encode reply: {message}")]
  Encode { message: String },
}

impl HostError {
  /// Create an encode error.
  pub fn encode(message: impl Into<String>) -> Self {
    Self::Encode {
      message: message.into(),
    }
  }
}
