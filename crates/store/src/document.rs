//! OpenDAL-backed snapshot document store.
//!
//! One JSON document per user at `users/{key}/ledger.json`, on whatever
//! backend the provider names: an S3-compatible bucket for the cloud store,
//! or a local filesystem root for the mirror.

use async_trait::async_trait;
use khata_core::ledger::types::LedgerSnapshot;
use khata_shared::types::UserKey;
use opendal::{ErrorKind, Operator, services};

use crate::config::StoreProvider;
use crate::error::StoreError;
use crate::gateway::SnapshotStore;

/// Snapshot store over an OpenDAL operator.
pub struct DocumentStore {
    operator: Operator,
    provider_name: &'static str,
}

impl DocumentStore {
    /// Create a document store from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    pub fn from_provider(provider: &StoreProvider) -> Result<Self, StoreError> {
        let operator = Self::create_operator(provider)?;
        Ok(Self {
            operator,
            provider_name: provider.name(),
        })
    }

    /// Create the OpenDAL operator for a provider.
    fn create_operator(provider: &StoreProvider) -> Result<Operator, StoreError> {
        match provider {
            StoreProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StoreError::configuration(e.to_string()))?
                    .finish())
            }
            StoreProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StoreError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StoreError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Storage key for a user's ledger document.
    ///
    /// Format: `users/{sanitized_user_key}/ledger.json`
    #[must_use]
    pub fn document_key(user: &UserKey) -> String {
        format!("users/{}/ledger.json", sanitize_user_key(user.as_str()))
    }

    /// Get the provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }
}

#[async_trait]
impl SnapshotStore for DocumentStore {
    async fn load(&self, user: &UserKey) -> Result<Option<LedgerSnapshot>, StoreError> {
        let key = Self::document_key(user);
        match self.operator.read(&key).await {
            Ok(buffer) => {
                let snapshot: LedgerSnapshot = serde_json::from_slice(&buffer.to_bytes())?;
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &UserKey, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        let key = Self::document_key(user);
        let bytes = serde_json::to_vec(snapshot)?;
        self.operator.write(&key, bytes).await?;
        Ok(())
    }
}

/// Sanitize a user key for use in a storage path.
///
/// Only ASCII alphanumeric characters, hyphens, and underscores survive;
/// everything else becomes an underscore, so a key can never climb out of
/// its `users/` prefix.
fn sanitize_user_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use khata_core::ledger::command::Command;
    use khata_core::ledger::engine::LedgerEngine;
    use khata_core::ledger::types::{Account, TransactionKind};
    use khata_shared::types::Money;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_snapshot() -> LedgerSnapshot {
        LedgerEngine::apply(
            &LedgerSnapshot::empty(),
            Command::RecordTransaction {
                kind: TransactionKind::Income,
                account: Account::Bank,
                amount: Money::from_decimal(dec!(1234.56)),
                date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                description: "Opening".to_string(),
                category: None,
            },
        )
        .unwrap()
    }

    fn temp_store() -> DocumentStore {
        let root = std::env::temp_dir().join(format!("khata-store-test-{}", Uuid::new_v4()));
        DocumentStore::from_provider(&StoreProvider::local_fs(root)).unwrap()
    }

    #[test]
    fn test_sanitize_user_key() {
        assert_eq!(sanitize_user_key("firebase-uid_42"), "firebase-uid_42");
        assert_eq!(sanitize_user_key("../escape"), "___escape");
        assert_eq!(sanitize_user_key("a/b c"), "a_b_c");
    }

    #[test]
    fn test_document_key_format() {
        let key = DocumentStore::document_key(&UserKey::new("uid-1"));
        assert_eq!(key, "users/uid-1/ledger.json");
    }

    #[tokio::test]
    async fn test_missing_document_loads_as_none() {
        let store = temp_store();
        let loaded = store.load(&UserKey::new("nobody")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = temp_store();
        let user = UserKey::new("uid-1");
        let snapshot = sample_snapshot();

        store.save(&user, &snapshot).await.unwrap();
        let loaded = store.load(&user).await.unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() {
        let store = temp_store();
        let user = UserKey::new("uid-1");
        let first = sample_snapshot();
        let second = LedgerEngine::apply(
            &first,
            Command::RecordTransaction {
                kind: TransactionKind::Expense,
                account: Account::Cash,
                amount: Money::from_decimal(dec!(10)),
                date: chrono::NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                description: "Tea".to_string(),
                category: None,
            },
        )
        .unwrap();

        store.save(&user, &first).await.unwrap();
        store.save(&user, &second).await.unwrap();

        let loaded = store.load(&user).await.unwrap();
        assert_eq!(loaded, Some(second));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = temp_store();
        let snapshot = sample_snapshot();

        store.save(&UserKey::new("uid-1"), &snapshot).await.unwrap();
        assert!(store.load(&UserKey::new("uid-2")).await.unwrap().is_none());
    }
}
