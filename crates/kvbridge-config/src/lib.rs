//! kvbridge Config
//!
//! Serializable configuration for a kvbridge host: which namespace it
//! registers under and how each storage area is backed.
//!
//! Configuration is loaded from a JSON file (via CLI with `--config`). Every
//! field is optional; an empty object gives the defaults:
//!
//! ```json
//! {
//!   "namespace": "kvbridge",
//!   "local": { "backend": "file" },
//!   "session": { "backend": "memory" }
//! }
//! ```

mod area;
mod bridge;

pub use area::{AreaConfig, Backend};
pub use bridge::{BridgeConfig, ConfigError};
