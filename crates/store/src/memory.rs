//! In-memory snapshot store.
//!
//! Serves two purposes: the fallback store when no user identity or remote
//! backend is configured, and the recording double used to assert what was
//! written and when.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use khata_core::ledger::types::LedgerSnapshot;
use khata_shared::types::UserKey;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::gateway::SnapshotStore;

/// One recorded write.
#[derive(Debug, Clone)]
pub struct WriteRecord {
    /// The user whose document was written.
    pub user: UserKey,
    /// The snapshot that was written.
    pub snapshot: LedgerSnapshot,
    /// When the write happened.
    pub at: DateTime<Utc>,
}

/// Snapshot store backed by a map, with a write log.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, LedgerSnapshot>>,
    writes: Mutex<Vec<WriteRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write accepted so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of writes accepted so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self, user: &UserKey) -> Result<Option<LedgerSnapshot>, StoreError> {
        Ok(self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user.as_str())
            .cloned())
    }

    async fn save(&self, user: &UserKey, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.as_str().to_string(), snapshot.clone());
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(WriteRecord {
                user: user.clone(),
                snapshot: snapshot.clone(),
                at: Utc::now(),
            });
        Ok(())
    }
}
