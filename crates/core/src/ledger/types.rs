//! Cash-book domain types.
//!
//! This module defines the ledger snapshot and every entity it aggregates.
//! The snapshot is the unit of persistence: it is read and written wholesale,
//! so every type here is serde-serializable with the camelCase field names of
//! the stored document. Derived fields (`Balance::total`, loan and saving
//! balances, settlement status) are recomputed after every mutation and never
//! trusted independently.

use chrono::{DateTime, NaiveDate, Utc};
use khata_shared::types::{
    DebtId, InstallmentId, LoanId, Money, PaymentId, SavingId, SavingTxnId, TransactionId,
    WithdrawalId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account an amount moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Account {
    /// Physical cash in hand.
    Cash,
    /// The business bank account.
    Bank,
}

impl Account {
    /// Returns the wire name of the account.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

/// Direction of a cash-book transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into the business.
    Income,
    /// Money going out of the business.
    Expense,
}

impl TransactionKind {
    /// Returns the wire name of the transaction kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Settlement status for loans and goods debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Something is still owed.
    Active,
    /// Fully settled.
    Paid,
}

impl SettlementStatus {
    /// Derives the status from a remaining balance.
    #[must_use]
    pub const fn from_remaining(remaining: Money) -> Self {
        if remaining.is_positive() {
            Self::Active
        } else {
            Self::Paid
        }
    }
}

/// Direction of a savings transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingTxnKind {
    /// Money moved into the savings account.
    Deposit,
    /// Money taken out of the savings account.
    Withdrawal,
}

/// Running bank/cash balance of the business.
///
/// Invariant: `total == bank + cash`, restored after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    /// Balance of the bank account.
    #[serde(default)]
    pub bank: Money,
    /// Cash in hand.
    #[serde(default)]
    pub cash: Money,
    /// Derived sum of the two accounts.
    #[serde(default)]
    pub total: Money,
}

impl Balance {
    /// Restores the `total == bank + cash` invariant.
    pub fn recompute_total(&mut self) {
        self.total = self.bank + self.cash;
    }

    /// Applies a signed delta to the named account and recomputes the total.
    pub fn apply(&mut self, account: Account, delta: Money) {
        match account {
            Account::Bank => self.bank += delta,
            Account::Cash => self.cash += delta,
        }
        self.recompute_total();
    }
}

/// A single income or expense entry. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Day the money moved.
    pub date: NaiveDate,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Account the amount moved through.
    pub account: Account,
    /// Amount moved; always positive, the kind carries the sign.
    pub amount: Money,
    /// Free-form description.
    pub description: String,
    /// Optional reporting category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

/// Money lent to a person, repaid in installments.
///
/// Loans never touch [`Balance`]: the cash left the business before the loan
/// was recorded, and installment receipts are tracked here only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Unique identifier.
    pub id: LoanId,
    /// Who the money was lent to.
    pub person_name: String,
    /// Day the loan was given.
    pub date: NaiveDate,
    /// Agreed repayment date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Annual interest rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_rate: Decimal,
    /// Free-form notes about the loan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Principal lent out.
    pub total_amount: Money,
    /// Derived: `max(0, total_amount - sum of installments)`.
    #[serde(default)]
    pub remaining_balance: Money,
    /// Repayments received, append-only.
    #[serde(default)]
    pub installments: Vec<Installment>,
    /// Derived settlement status.
    pub status: SettlementStatus,
}

impl Loan {
    /// Sum of all installments received so far.
    #[must_use]
    pub fn paid_amount(&self) -> Money {
        self.installments.iter().map(|i| i.amount).sum()
    }

    /// Restores the remaining-balance and status invariants from the
    /// installment list.
    pub fn recompute(&mut self) {
        self.remaining_balance = (self.total_amount - self.paid_amount()).clamp_non_negative();
        self.status = SettlementStatus::from_remaining(self.remaining_balance);
    }

    /// Re-derives state on load: balances recomputed where the installment
    /// history exists, otherwise the stored remaining balance is kept (legacy
    /// documents predate per-installment history), clamped to zero or more.
    pub(crate) fn normalize(&mut self) {
        if self.installments.is_empty() {
            self.remaining_balance = self.remaining_balance.clamp_non_negative();
            self.status = SettlementStatus::from_remaining(self.remaining_balance);
        } else {
            self.recompute();
        }
    }
}

/// A repayment received against a loan. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    /// Unique identifier.
    pub id: InstallmentId,
    /// Amount received.
    pub amount: Money,
    /// Day the amount was received.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Goods sold on credit to a customer.
///
/// Several records may share the same customer name; they are grouped at read
/// time into a virtual customer row (see [`super::customer`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsDebt {
    /// Unique identifier.
    pub id: DebtId,
    /// Customer the goods were sold to.
    pub customer_name: String,
    /// What was sold.
    pub item_description: String,
    /// Day of the sale.
    pub date: NaiveDate,
    /// Agreed payment date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Customer contact details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Value of the goods.
    pub total_amount: Money,
    /// Derived: what is still owed on this line item.
    #[serde(default)]
    pub remaining_balance: Money,
    /// Payments received, append-only.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Derived settlement status.
    pub status: SettlementStatus,
}

impl GoodsDebt {
    /// Returns true while something is still owed on this line item.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.remaining_balance.is_positive()
    }

    /// Records a payment against this debt, clamping the remaining balance
    /// at zero and re-deriving the status.
    pub(crate) fn receive(&mut self, payment: Payment) {
        self.remaining_balance =
            (self.remaining_balance - payment.amount).clamp_non_negative();
        self.status = SettlementStatus::from_remaining(self.remaining_balance);
        self.payments.push(payment);
    }
}

/// A payment received against a goods debt. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Share of the customer payment applied to this debt.
    pub amount: Money,
    /// Day the payment was received.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

/// A savings account held alongside the cash book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    /// Unique identifier.
    pub id: SavingId,
    /// Display name of the account.
    pub account_name: String,
    /// Bank holding the account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Day the account was opened in the cash book.
    pub date: NaiveDate,
    /// Balance at the time the account was added.
    pub opening_balance: Money,
    /// Derived: opening balance folded with all child transactions.
    #[serde(default)]
    pub current_balance: Money,
    /// Deposits and withdrawals; the only editable child records.
    #[serde(default)]
    pub transactions: Vec<SavingTxn>,
}

impl Saving {
    /// Refolds `current_balance` from the opening balance over the child
    /// transactions in list order. Withdrawals may overdraw; no floor.
    pub fn recompute(&mut self) {
        let mut balance = self.opening_balance;
        for txn in &self.transactions {
            match txn.kind {
                SavingTxnKind::Deposit => balance += txn.amount,
                SavingTxnKind::Withdrawal => balance -= txn.amount,
            }
        }
        self.current_balance = balance;
    }
}

/// A deposit into or withdrawal from a savings account.
///
/// Unlike every other child record this one supports in-place edit and
/// delete; the parent balance is refolded after each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingTxn {
    /// Unique identifier.
    pub id: SavingTxnId,
    /// Deposit or withdrawal.
    #[serde(rename = "type")]
    pub kind: SavingTxnKind,
    /// Amount moved.
    pub amount: Money,
    /// Day of the movement.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Money the owner took out of the business.
///
/// Symmetric to an expense but kept in its own list for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerWithdrawal {
    /// Unique identifier.
    pub id: WithdrawalId,
    /// Amount withdrawn.
    pub amount: Money,
    /// Account the amount came out of.
    pub account: Account,
    /// Why the owner took the money.
    pub reason: String,
    /// Day of the withdrawal.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Display preferences stored with the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency symbol used for formatting.
    pub currency: String,
    /// Preferred date display format.
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "₹".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
        }
    }
}

/// The aggregate root: the complete ledger of one user.
///
/// This whole object is the unit of persistence; it is loaded and saved
/// wholesale, never field by field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Running bank/cash balance.
    #[serde(default)]
    pub balance: Balance,
    /// Income and expenses, newest first.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Loans given out, newest first.
    #[serde(default)]
    pub loans: Vec<Loan>,
    /// Savings accounts, newest first.
    #[serde(default)]
    pub savings: Vec<Saving>,
    /// Goods sold on credit, newest first.
    #[serde(default)]
    pub goods_debt: Vec<GoodsDebt>,
    /// Owner withdrawals, newest first.
    #[serde(default)]
    pub owner_withdrawals: Vec<OwnerWithdrawal>,
    /// Display preferences.
    #[serde(default)]
    pub settings: Settings,
}

impl LedgerSnapshot {
    /// A pristine empty ledger with default settings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Re-derives state after loading a stored document so a stale or
    /// hand-edited snapshot cannot import an inconsistent balance or loan
    /// status. Mirrors what happens after every in-memory mutation.
    pub fn normalize(&mut self) {
        self.balance.recompute_total();
        for loan in &mut self.loans {
            loan.normalize();
        }
    }
}
