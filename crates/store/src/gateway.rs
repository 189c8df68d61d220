//! The persistence gateway contract.

use async_trait::async_trait;
use khata_core::ledger::types::LedgerSnapshot;
use khata_shared::types::UserKey;

use crate::error::StoreError;

/// Durable storage of whole ledger snapshots keyed by user identity.
///
/// The snapshot is the unit of persistence: implementations read and write
/// the full document, never individual fields. Writes are last-write-wins;
/// there is no merging of concurrent edits.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the user's snapshot, or `None` when nothing is stored yet.
    async fn load(&self, user: &UserKey) -> Result<Option<LedgerSnapshot>, StoreError>;

    /// Stores the user's snapshot wholesale, replacing any previous document.
    async fn save(&self, user: &UserKey, snapshot: &LedgerSnapshot) -> Result<(), StoreError>;
}
