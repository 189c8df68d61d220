//! Summary figures derived from a snapshot.
//!
//! Everything here is recomputed on every call; caching across mutations
//! would go stale.

pub mod service;
pub mod types;

pub use service::StatsService;
pub use types::LedgerStats;
