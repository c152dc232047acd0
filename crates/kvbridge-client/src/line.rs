//! Transport over a pair of byte streams, one JSON value per line.

use async_trait::async_trait;
use kvbridge_protocol::{Call, Reply, Transport, TransportError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;
use tracing::debug;

/// Talks to a host serving JSON lines, e.g. a child `kvbridge serve`
/// process.
///
/// Calls are serialized: each one writes a line and waits for the matching
/// reply line before the next call may write. Replies carry no correlation
/// id, so a call dropped between writing its frame and reading its reply
/// leaves the stream out of step. The transport is then closed for good and
/// every later call fails with [`TransportError::Closed`].
pub struct LineTransport<R, W> {
  inner: Mutex<Inner<R, W>>,
}

struct Inner<R, W> {
  replies: Lines<R>,
  writer: W,
  /// Set while a call is in flight; still set if that call never finished.
  in_flight: bool,
}

impl<R, W> LineTransport<R, W>
where
  R: AsyncBufRead + Unpin + Send,
  W: AsyncWrite + Unpin + Send,
{
  pub fn new(reader: R, writer: W) -> Self {
    Self {
      inner: Mutex::new(Inner {
        replies: reader.lines(),
        writer,
        in_flight: false,
      }),
    }
  }
}

#[async_trait]
impl<R, W> Transport for LineTransport<R, W>
where
  R: AsyncBufRead + Unpin + Send,
  W: AsyncWrite + Unpin + Send,
{
  async fn call(&self, call: Call) -> Result<Reply, TransportError> {
    let mut frame =
      serde_json::to_vec(&call).map_err(|e| TransportError::frame(e.to_string()))?;
    frame.push(b'\n');

    let mut inner = self.inner.lock().await;
    if inner.in_flight {
      debug!(function = %call.function, "earlier call did not complete, stream is out of step");
      return Err(TransportError::Closed);
    }

    inner.in_flight = true;
    inner.writer.write_all(&frame).await?;
    inner.writer.flush().await?;

    let Some(line) = inner.replies.next_line().await? else {
      debug!(function = %call.function, "host closed before replying");
      return Err(TransportError::Closed);
    };

    inner.in_flight = false;
    serde_json::from_str(&line).map_err(|e| TransportError::frame(e.to_string()))
  }
}
