//! Host-side operation registry for kvbridge.
//!
//! This crate binds the ten kvbridge functions to two injected storage areas
//! and answers [`Call`](kvbridge_protocol::Call)s with
//! [`Reply`](kvbridge_protocol::Reply)s. It provides:
//! - [`Registry`]: the immutable function table and dispatcher
//! - [`LocalTransport`]: an in-process transport that runs calls on the tokio runtime
//! - [`serve_lines`]: a JSON-lines server loop over any async reader/writer pair
//!
//! Storage is never retried and nothing is cached; every call reaches its
//! area exactly once.

mod error;
mod local;
mod registry;
mod serve;

pub use error::HostError;
pub use local::LocalTransport;
pub use registry::{Areas, Registry};
pub use serve::serve_lines;
