//! Cash-book ledger state and the operations that mutate it.
//!
//! This module implements the core cash-book functionality:
//! - The ledger snapshot and its entities
//! - Commands, one per user-visible operation
//! - The pure reduction engine applying commands
//! - Proportional allocation of customer payments across goods debts
//! - Read-time customer aggregation
//! - Error types for rejected commands

pub mod allocation;
pub mod command;
pub mod customer;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use allocation::PaymentTarget;
pub use command::{Command, SavingTxnUpdate, SettingsUpdate};
pub use customer::{CustomerAggregate, group_by_customer, normalize_customer_key};
pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use types::{
    Account, Balance, GoodsDebt, Installment, LedgerSnapshot, Loan, OwnerWithdrawal, Payment,
    Saving, SavingTxn, SavingTxnKind, SettlementStatus, Settings, Transaction, TransactionKind,
};
