//! JSON-lines server loop.
//!
//! One [`Call`] per input line, one [`Reply`] per output line, in order.

use std::sync::Arc;

use kvbridge_protocol::{Call, Reply, WireError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::HostError;
use crate::registry::Registry;

/// Serve calls read from `reader` until end of input or cancellation.
///
/// Each call runs on tokio's blocking pool, as with
/// [`LocalTransport`](crate::LocalTransport), and calls are answered in the
/// order they were read. Blank lines are skipped. A line that is not a valid call is answered with
/// an `invalid_argument` error reply and the loop carries on. Returns the
/// number of replies written.
pub async fn serve_lines<R, W>(
  registry: Arc<Registry>,
  reader: R,
  mut writer: W,
  cancel: CancellationToken,
) -> Result<u64, HostError>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let mut lines = reader.lines();
  let mut served = 0;

  info!(namespace = %registry.namespace(), "serving calls");

  loop {
    let line = tokio::select! {
      _ = cancel.cancelled() => {
        debug!("serve loop cancelled");
        break;
      }
      line = lines.next_line() => line?,
    };

    let Some(line) = line else {
      debug!("end of input");
      break;
    };

    if line.trim().is_empty() {
      continue;
    }

    let reply = match serde_json::from_str::<Call>(&line) {
      Ok(call) => {
        let registry = Arc::clone(&registry);
        match tokio::task::spawn_blocking(move || registry.dispatch(call)).await {
          Ok(reply) => reply,
          Err(e) => Reply::Err(WireError::storage(format!("call did not complete: {}", e))),
        }
      }
      Err(e) => Reply::Err(WireError::invalid_argument(format!("malformed call: {}", e))),
    };

    let mut frame = serde_json::to_vec(&reply).map_err(|e| HostError::encode(e.to_string()))?;
    frame.push(b'\n');
    writer.write_all(&frame).await?;
    writer.flush().await?;
    served += 1;
  }

  info!(served, "serve loop stopped");
  Ok(served)
}
