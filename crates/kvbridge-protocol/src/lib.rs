//! kvbridge Protocol
//!
//! This crate is the interop contract shared by the host registry and the
//! caller facade. It defines:
//! - [`Namespace`]: the package identity and version both sides bind to
//! - [`Operation`]: the fixed set of ten functions (five per [`Area`])
//! - [`Request`]: the tagged, shape-checked form of a call argument
//! - [`Call`] and [`Reply`]: the JSON values that cross the transport
//! - [`Transport`]: the seam the cross-boundary call mechanism plugs into
//!
//! Argument encodings:
//!
//! | Operation  | Argument                       | Result                  |
//! |------------|--------------------------------|-------------------------|
//! | `get`      | `"key"`                        | `"value"` or `null`     |
//! | `put`      | `{"key": "k", "value": "v"}`   | `null`                  |
//! | `remove`   | `"key"`                        | `null`                  |
//! | `listKeys` | `null`                         | `["k1", "k2"]`          |
//! | `clear`    | `null`                         | `null`                  |

mod namespace;
mod operation;
mod request;
mod transport;
mod wire;

pub use namespace::{DEFAULT_NAMESPACE, Namespace, PROTOCOL_VERSION};
pub use operation::{Area, OpKind, Operation};
pub use request::{Request, Response};
pub use transport::{Transport, TransportError};
pub use wire::{Call, Reply, WireError, WireErrorKind};
