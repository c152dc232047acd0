//! kvbridge Store
//!
//! This crate provides the [`StorageArea`] trait: a handle to one isolated
//! key-value area owned by the host environment. The bridge never reaches
//! storage through a global; each area is constructed at startup and injected
//! into the host registry.
//!
//! Implementations:
//! - [`InMemoryArea`] for session-scoped storage and tests
//! - [`FsArea`] for persistent storage backed by a JSON file
//! - [`DisabledArea`] for hosts where storage is turned off

mod area;
mod disabled;
mod error;
mod fs;
mod memory;

pub use area::StorageArea;
pub use disabled::DisabledArea;
pub use error::StoreError;
pub use fs::FsArea;
pub use memory::InMemoryArea;
