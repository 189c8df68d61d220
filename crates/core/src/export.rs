//! Snapshot backup and transaction export.
//!
//! Two consumer-facing renderings of the ledger: a pretty-printed JSON
//! backup of the whole snapshot, and a CSV of the transaction list with the
//! columns `Date, Description, Type, Account, Amount, Category`.

use khata_shared::AppError;
use serde::Serialize;
use thiserror::Error;

use crate::ledger::types::{LedgerSnapshot, Transaction};

/// Errors from export rendering.
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error("CSV write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered CSV was not valid UTF-8.
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// One CSV row of the transaction export.
#[derive(Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'a str,
}

/// Renders the full snapshot as a pretty-printed JSON backup.
pub fn snapshot_json(snapshot: &LedgerSnapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Renders the transaction list as CSV, newest first as stored.
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for txn in transactions {
        writer.serialize(TransactionRow {
            date: txn.date.to_string(),
            description: &txn.description,
            kind: txn.kind.as_str(),
            account: txn.account.as_str(),
            amount: txn.amount.to_string(),
            category: txn.category.as_deref().unwrap_or(""),
        })?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::command::Command;
    use crate::ledger::engine::LedgerEngine;
    use crate::ledger::types::{Account, TransactionKind};
    use chrono::NaiveDate;
    use khata_shared::types::Money;
    use rust_decimal_macros::dec;

    fn sample_snapshot() -> LedgerSnapshot {
        let mut snapshot = LedgerSnapshot::empty();
        let commands = vec![
            Command::RecordTransaction {
                kind: TransactionKind::Income,
                account: Account::Bank,
                amount: Money::from_decimal(dec!(1500.50)),
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                description: "Daily sales".to_string(),
                category: Some("Sales".to_string()),
            },
            Command::RecordTransaction {
                kind: TransactionKind::Expense,
                account: Account::Cash,
                amount: Money::from_decimal(dec!(200)),
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                description: "Shop rent, June".to_string(),
                category: None,
            },
            Command::CreateLoan {
                person_name: "Ravi".to_string(),
                amount: Money::from_decimal(dec!(500)),
                interest_rate: dec!(1.5),
                date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
                due_date: Some(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()),
                description: Some("Seed money".to_string()),
            },
            Command::CreateGoodsDebt {
                customer_name: "Alice".to_string(),
                item_description: "Rice bags".to_string(),
                total_amount: Money::from_decimal(dec!(60)),
                date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
                due_date: None,
                contact: Some("98765".to_string()),
            },
            Command::CreateSaving {
                account_name: "FD".to_string(),
                opening_balance: Money::from_decimal(dec!(1000)),
                bank: Some("SBI".to_string()),
                notes: None,
                date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            },
            Command::RecordOwnerWithdrawal {
                amount: Money::from_decimal(dec!(100)),
                account: Account::Bank,
                reason: "Household".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(),
                notes: String::new(),
            },
        ];
        for command in commands {
            snapshot = LedgerEngine::apply(&snapshot, command).unwrap();
        }
        snapshot
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = sample_snapshot();
        let json = snapshot_json(&snapshot).unwrap();
        let back: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_wire_field_names() {
        let snapshot = sample_snapshot();
        let json = snapshot_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // Document shape: camelCase keys, amounts as plain numbers, dates as
        // YYYY-MM-DD strings.
        assert!(value.get("goodsDebt").is_some());
        assert!(value.get("ownerWithdrawals").is_some());
        let loan = &value["loans"][0];
        assert!(loan["totalAmount"].is_number());
        assert!(loan["remainingBalance"].is_number());
        assert_eq!(loan["date"], "2025-06-03");
        let txn = &value["transactions"][0];
        assert!(txn["type"].is_string());
        assert!(txn["amount"].is_number());
    }

    #[test]
    fn test_transactions_csv_columns_and_rows() {
        let snapshot = sample_snapshot();
        let rendered = transactions_csv(&snapshot.transactions).unwrap();
        let mut lines = rendered.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Date,Description,Type,Account,Amount,Category"
        );
        // Newest first: the rent expense precedes the sales income.
        let rent = lines.next().unwrap();
        assert_eq!(rent, "2025-06-02,\"Shop rent, June\",expense,cash,200.00,");
        let sales = lines.next().unwrap();
        assert_eq!(sales, "2025-06-01,Daily sales,income,bank,1500.50,Sales");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_transaction_list_renders_header_only() {
        let rendered = transactions_csv(&[]).unwrap();
        assert!(rendered.is_empty() || rendered.trim() == "Date,Description,Type,Account,Amount,Category");
    }
}
