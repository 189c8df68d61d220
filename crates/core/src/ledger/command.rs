//! Ledger commands.
//!
//! Every user action reduces to one tagged [`Command`] variant, dispatched
//! through the single reduction function in [`super::engine`]. The payloads
//! carry already-typed values; amount validation beyond what the engine
//! enforces belongs to the calling layer.

use chrono::NaiveDate;
use khata_shared::types::{DebtId, LoanId, Money, SavingId, SavingTxnId, TransactionId};
use rust_decimal::Decimal;

use super::allocation::PaymentTarget;
use super::types::{Account, SavingTxn, SavingTxnKind, Settings, TransactionKind};

/// A single state transition of the ledger.
#[derive(Debug, Clone)]
pub enum Command {
    /// Record an income or expense against the bank/cash balance.
    RecordTransaction {
        /// Income or expense.
        kind: TransactionKind,
        /// Account the amount moves through.
        account: Account,
        /// Amount moved.
        amount: Money,
        /// Day the money moved.
        date: NaiveDate,
        /// Free-form description.
        description: String,
        /// Optional reporting category.
        category: Option<String>,
    },
    /// Remove a transaction. The balance effect is NOT reversed.
    DeleteTransaction {
        /// Transaction to remove.
        transaction_id: TransactionId,
    },
    /// Create a loan given to a person. Does not touch the balance.
    CreateLoan {
        /// Who the money was lent to.
        person_name: String,
        /// Principal lent out.
        amount: Money,
        /// Annual interest rate in percent.
        interest_rate: Decimal,
        /// Day the loan was given.
        date: NaiveDate,
        /// Agreed repayment date, if any.
        due_date: Option<NaiveDate>,
        /// Free-form notes about the loan.
        description: Option<String>,
    },
    /// Record a repayment received against a loan.
    RecordLoanInstallment {
        /// Loan being repaid.
        loan_id: LoanId,
        /// Amount received.
        amount: Money,
        /// Day the amount was received.
        date: NaiveDate,
        /// Free-form notes.
        notes: String,
    },
    /// Remove a loan together with its installment history.
    DeleteLoan {
        /// Loan to remove.
        loan_id: LoanId,
    },
    /// Add a savings account.
    CreateSaving {
        /// Display name of the account.
        account_name: String,
        /// Balance at the time the account was added.
        opening_balance: Money,
        /// Bank holding the account, if any.
        bank: Option<String>,
        /// Free-form notes.
        notes: Option<String>,
        /// Day the account was added.
        date: NaiveDate,
    },
    /// Record a deposit or withdrawal on a savings account.
    RecordSavingTransaction {
        /// Savings account.
        saving_id: SavingId,
        /// Deposit or withdrawal.
        kind: SavingTxnKind,
        /// Amount moved.
        amount: Money,
        /// Day of the movement.
        date: NaiveDate,
        /// Free-form notes.
        notes: String,
    },
    /// Merge-update a savings transaction in place.
    UpdateSavingTransaction {
        /// Savings account.
        saving_id: SavingId,
        /// Transaction to update.
        txn_id: SavingTxnId,
        /// Fields to change; unset fields keep their value.
        updates: SavingTxnUpdate,
    },
    /// Remove a savings transaction.
    DeleteSavingTransaction {
        /// Savings account.
        saving_id: SavingId,
        /// Transaction to remove.
        txn_id: SavingTxnId,
    },
    /// Remove a savings account with its history.
    DeleteSaving {
        /// Savings account to remove.
        saving_id: SavingId,
    },
    /// Record goods sold on credit.
    CreateGoodsDebt {
        /// Customer the goods were sold to.
        customer_name: String,
        /// What was sold.
        item_description: String,
        /// Value of the goods.
        total_amount: Money,
        /// Day of the sale.
        date: NaiveDate,
        /// Agreed payment date, if any.
        due_date: Option<NaiveDate>,
        /// Customer contact details.
        contact: Option<String>,
    },
    /// Apply a customer payment across open goods debts; see
    /// [`super::allocation`] for the split rules.
    RecordGoodsDebtPayment {
        /// Customer name; normalized for matching.
        customer: String,
        /// Amount paid.
        amount: Money,
        /// All open debts pro rata, or one specific debt.
        apply_to: PaymentTarget,
        /// Day the payment was received.
        date: NaiveDate,
        /// Free-form notes.
        notes: String,
    },
    /// Remove one goods-debt line item. Sibling debts of the same customer
    /// are not rebalanced.
    DeleteGoodsDebt {
        /// Line item to remove.
        debt_id: DebtId,
    },
    /// Record money the owner took out of the business.
    RecordOwnerWithdrawal {
        /// Amount withdrawn.
        amount: Money,
        /// Account the amount came out of.
        account: Account,
        /// Why the owner took the money.
        reason: String,
        /// Day of the withdrawal.
        date: NaiveDate,
        /// Free-form notes.
        notes: String,
    },
    /// Merge new display preferences into the stored settings.
    UpdateSettings {
        /// Fields to change; unset fields keep their value.
        update: SettingsUpdate,
    },
    /// Wipe the ledger back to a pristine empty snapshot.
    Reset,
}

/// Partial update for a savings transaction.
#[derive(Debug, Clone, Default)]
pub struct SavingTxnUpdate {
    /// New direction, if changing.
    pub kind: Option<SavingTxnKind>,
    /// New amount, if changing.
    pub amount: Option<Money>,
    /// New date, if changing.
    pub date: Option<NaiveDate>,
    /// New notes, if changing.
    pub notes: Option<String>,
}

impl SavingTxnUpdate {
    /// Merges the set fields into the transaction.
    pub fn apply_to(self, txn: &mut SavingTxn) {
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(notes) = self.notes {
            txn.notes = notes;
        }
    }
}

/// Partial update for display preferences.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    /// New currency symbol, if changing.
    pub currency: Option<String>,
    /// New date display format, if changing.
    pub date_format: Option<String>,
}

impl SettingsUpdate {
    /// Merges the set fields into the settings.
    pub fn apply_to(self, settings: &mut Settings) {
        if let Some(currency) = self.currency {
            settings.currency = currency;
        }
        if let Some(date_format) = self.date_format {
            settings.date_format = date_format;
        }
    }
}
