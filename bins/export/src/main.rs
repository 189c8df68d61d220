//! Khata export tool
//!
//! Loads a user's ledger snapshot from the configured stores and writes the
//! JSON backup plus the transaction CSV next to each other.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use khata_core::export;
use khata_shared::types::UserKey;
use khata_shared::{AppConfig, AppError, AppResult};
use khata_store::{DocumentStore, LedgerSync, SnapshotStore, StoreProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "khata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let user = args
        .next()
        .map(UserKey::new)
        .ok_or_else(|| anyhow::anyhow!("usage: khata-export <user-key> [out-dir]"))?;
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    run(&config, &user, &out_dir).await?;
    Ok(())
}

async fn run(config: &AppConfig, user: &UserKey, out_dir: &Path) -> AppResult<()> {
    let local: Arc<dyn SnapshotStore> = Arc::new(DocumentStore::from_provider(
        &StoreProvider::local_fs(&config.store.local_root),
    )?);
    let remote: Option<Arc<dyn SnapshotStore>> = match &config.store.remote {
        Some(remote) => Some(Arc::new(DocumentStore::from_provider(&StoreProvider::s3(
            &remote.endpoint,
            &remote.bucket,
            &remote.access_key_id,
            &remote.secret_access_key,
            &remote.region,
        ))?) as Arc<dyn SnapshotStore>),
        None => None,
    };
    let sync = LedgerSync::new(local, remote);

    let Some(snapshot) = sync.load(user).await? else {
        info!(user = %user, "no ledger stored for user, nothing to export");
        return Ok(());
    };

    let backup_name = format!("cash-book-backup-{}.json", chrono::Utc::now().date_naive());
    let backup_path = out_dir.join(backup_name);
    std::fs::write(&backup_path, export::snapshot_json(&snapshot)?)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let csv_path = out_dir.join("transactions.csv");
    std::fs::write(&csv_path, export::transactions_csv(&snapshot.transactions)?)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(
        transactions = snapshot.transactions.len(),
        loans = snapshot.loans.len(),
        balance_total = %snapshot.balance.total,
        backup = %backup_path.display(),
        csv = %csv_path.display(),
        "export complete"
    );
    Ok(())
}
