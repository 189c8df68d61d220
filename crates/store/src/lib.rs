//! Persistence gateway for Khata ledger snapshots.
//!
//! The engine in `khata-core` is pure; this crate owns durability. One JSON
//! document per user holds the whole ledger snapshot, written wholesale
//! after every accepted mutation:
//!
//! - [`SnapshotStore`] - the gateway contract
//! - [`DocumentStore`] - OpenDAL-backed store (S3-compatible remote or
//!   local filesystem)
//! - [`MemoryStore`] - in-memory store that records writes, for tests and
//!   identity-less fallback
//! - [`LedgerSync`] - the dual-sink layer: local mirror written
//!   synchronously, remote fire-and-forget, live-update subscription

pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod sync;

pub use config::StoreProvider;
pub use document::DocumentStore;
pub use error::StoreError;
pub use gateway::SnapshotStore;
pub use memory::{MemoryStore, WriteRecord};
pub use sync::LedgerSync;
