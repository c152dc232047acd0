//! kvbridge Client
//!
//! Caller-side facade over the kvbridge interop contract. Each of the ten
//! host functions is an `async fn` on [`AreaClient`] that encodes its
//! argument, sends one call through a
//! [`Transport`](kvbridge_protocol::Transport) and decodes the reply:
//!
//! ```ignore
//! let client = Client::new(transport);
//! client.local().put("theme", "\"dark\"").await?;
//! let theme = client.local().get("theme").await?; // Some("\"dark\"")
//! ```
//!
//! Every failure is a [`ClientError`] naming the operation that failed.
//! Nothing is retried, cached or logged here.

mod client;
mod decode;
mod error;
mod line;

pub use client::{AreaClient, Client};
pub use error::{ClientError, ErrorKind};
pub use line::LineTransport;
