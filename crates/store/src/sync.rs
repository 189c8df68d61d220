//! Dual-sink persistence: local mirror plus fire-and-forget remote.
//!
//! Every accepted mutation is written to the local mirror synchronously and
//! to the remote document store on a background task. Neither failure rolls
//! back the in-memory mutation that already succeeded: errors are logged and
//! the local mirror stays authoritative until a later save wins. Loads
//! prefer the remote store and fall back to the mirror when the remote is
//! unreachable or has nothing stored. Cross-device edits are last-write-wins
//! by design.

use khata_core::ledger::types::LedgerSnapshot;
use khata_shared::types::UserKey;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::StoreError;
use crate::gateway::SnapshotStore;

/// The dual-sink snapshot writer with a live-update channel.
pub struct LedgerSync {
    local: Arc<dyn SnapshotStore>,
    remote: Option<Arc<dyn SnapshotStore>>,
    updates: watch::Sender<Option<LedgerSnapshot>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl LedgerSync {
    /// Creates a sync layer over a local mirror and an optional remote store.
    #[must_use]
    pub fn new(local: Arc<dyn SnapshotStore>, remote: Option<Arc<dyn SnapshotStore>>) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            local,
            remote,
            updates,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Loads the user's snapshot, preferring the remote store and falling
    /// back to the local mirror on error or absence. Loaded snapshots are
    /// normalized so a stale document cannot import inconsistent state.
    pub async fn load(&self, user: &UserKey) -> Result<Option<LedgerSnapshot>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.load(user).await {
                Ok(Some(mut snapshot)) => {
                    snapshot.normalize();
                    return Ok(Some(snapshot));
                }
                Ok(None) => {
                    debug!(user = %user, "no remote document, consulting local mirror");
                }
                Err(err) => {
                    warn!(user = %user, error = %err, "remote load failed, falling back to local mirror");
                }
            }
        }
        let mut loaded = self.local.load(user).await?;
        if let Some(snapshot) = &mut loaded {
            snapshot.normalize();
        }
        Ok(loaded)
    }

    /// Persists an accepted snapshot.
    ///
    /// The local mirror is written before returning; the remote write runs
    /// on a background task. Failures on either sink are logged and
    /// swallowed - the mutation that produced this snapshot has already
    /// happened and is never rolled back. Subscribers see the snapshot
    /// regardless of sink outcomes.
    pub async fn save(&self, user: &UserKey, snapshot: &LedgerSnapshot) {
        if let Err(err) = self.local.save(user, snapshot).await {
            error!(user = %user, error = %err, "local mirror write failed");
        }

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let user = user.clone();
            let snapshot = snapshot.clone();
            let handle = tokio::spawn(async move {
                if let Err(err) = remote.save(&user, &snapshot).await {
                    warn!(
                        user = %user,
                        error = %err,
                        "remote write failed; local mirror stays authoritative"
                    );
                }
            });
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(handle);
        }

        self.updates.send_replace(Some(snapshot.clone()));
    }

    /// Live-sync channel: yields every accepted snapshot save.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<LedgerSnapshot>> {
        self.updates.subscribe()
    }

    /// Waits for in-flight remote writes. Call before shutdown; during
    /// normal operation nothing waits on the remote.
    pub async fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for handle in handles {
            if let Err(err) = handle.await {
                warn!(error = %err, "remote write task failed to join");
            }
        }
    }
}
