//! The ledger reduction engine.
//!
//! One pure function turns the current snapshot plus a [`Command`] into the
//! next snapshot. The caller owns the current snapshot and re-invokes the
//! engine per command; there is no hidden state. A rejected command returns
//! an error and the caller's snapshot is untouched.
//!
//! Two behaviors are deliberate and load-bearing:
//! - loans and their installments never touch the bank/cash balance, and
//! - deleting a transaction does not reverse its balance effect.

use chrono::{NaiveDate, Utc};
use khata_shared::types::{
    DebtId, InstallmentId, LoanId, Money, SavingId, SavingTxnId, TransactionId, WithdrawalId,
};
use rust_decimal::Decimal;

use super::allocation;
use super::command::{Command, SavingTxnUpdate};
use super::error::LedgerError;
use super::types::{
    Account, GoodsDebt, Installment, LedgerSnapshot, Loan, OwnerWithdrawal, Saving, SavingTxn,
    SavingTxnKind, SettlementStatus, Transaction, TransactionKind,
};

/// The ledger state-update engine.
///
/// Stateless; every operation is an associated function over a snapshot.
pub struct LedgerEngine;

impl LedgerEngine {
    /// Applies a command and returns the next snapshot.
    ///
    /// Unknown ids are silent no-ops for deletions and savings-transaction
    /// edits, matching the observed cash-book behavior; recording an
    /// installment against an unknown loan is the one id-miss that errors.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when a precondition fails; the input snapshot
    /// is never partially modified on the error path.
    pub fn apply(
        snapshot: &LedgerSnapshot,
        command: Command,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let mut next = snapshot.clone();
        match command {
            Command::RecordTransaction {
                kind,
                account,
                amount,
                date,
                description,
                category,
            } => {
                Self::record_transaction(&mut next, kind, account, amount, date, description, category);
            }
            Command::DeleteTransaction { transaction_id } => {
                // The balance effect stays in place.
                next.transactions.retain(|t| t.id != transaction_id);
            }
            Command::CreateLoan {
                person_name,
                amount,
                interest_rate,
                date,
                due_date,
                description,
            } => {
                Self::create_loan(&mut next, person_name, amount, interest_rate, date, due_date, description);
            }
            Command::RecordLoanInstallment {
                loan_id,
                amount,
                date,
                notes,
            } => {
                Self::record_loan_installment(&mut next, loan_id, amount, date, notes)?;
            }
            Command::DeleteLoan { loan_id } => {
                next.loans.retain(|l| l.id != loan_id);
            }
            Command::CreateSaving {
                account_name,
                opening_balance,
                bank,
                notes,
                date,
            } => {
                Self::create_saving(&mut next, account_name, opening_balance, bank, notes, date);
            }
            Command::RecordSavingTransaction {
                saving_id,
                kind,
                amount,
                date,
                notes,
            } => {
                Self::record_saving_transaction(&mut next, saving_id, kind, amount, date, notes);
            }
            Command::UpdateSavingTransaction {
                saving_id,
                txn_id,
                updates,
            } => {
                Self::update_saving_transaction(&mut next, saving_id, txn_id, updates);
            }
            Command::DeleteSavingTransaction { saving_id, txn_id } => {
                if let Some(saving) = Self::saving_mut(&mut next, saving_id) {
                    saving.transactions.retain(|t| t.id != txn_id);
                    saving.recompute();
                }
            }
            Command::DeleteSaving { saving_id } => {
                next.savings.retain(|s| s.id != saving_id);
            }
            Command::CreateGoodsDebt {
                customer_name,
                item_description,
                total_amount,
                date,
                due_date,
                contact,
            } => {
                Self::create_goods_debt(&mut next, customer_name, item_description, total_amount, date, due_date, contact);
            }
            Command::RecordGoodsDebtPayment {
                customer,
                amount,
                apply_to,
                date,
                notes,
            } => {
                allocation::record_customer_payment(
                    &mut next.goods_debt,
                    &customer,
                    amount,
                    apply_to,
                    date,
                    &notes,
                )?;
            }
            Command::DeleteGoodsDebt { debt_id } => {
                // Sibling debts of the same customer are not rebalanced.
                next.goods_debt.retain(|d| d.id != debt_id);
            }
            Command::RecordOwnerWithdrawal {
                amount,
                account,
                reason,
                date,
                notes,
            } => {
                Self::record_owner_withdrawal(&mut next, amount, account, reason, date, notes);
            }
            Command::UpdateSettings { update } => {
                update.apply_to(&mut next.settings);
            }
            Command::Reset => {
                next = LedgerSnapshot::empty();
            }
        }
        Ok(next)
    }

    fn record_transaction(
        next: &mut LedgerSnapshot,
        kind: TransactionKind,
        account: Account,
        amount: Money,
        date: NaiveDate,
        description: String,
        category: Option<String>,
    ) {
        let delta = match kind {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        };
        next.balance.apply(account, delta);
        next.transactions.insert(
            0,
            Transaction {
                id: TransactionId::new(),
                date,
                kind,
                account,
                amount,
                description,
                category,
                timestamp: Utc::now(),
            },
        );
    }

    fn create_loan(
        next: &mut LedgerSnapshot,
        person_name: String,
        amount: Money,
        interest_rate: Decimal,
        date: NaiveDate,
        due_date: Option<NaiveDate>,
        description: Option<String>,
    ) {
        // The cash left the business before the loan was recorded; the
        // balance stays where it is.
        next.loans.insert(
            0,
            Loan {
                id: LoanId::new(),
                person_name,
                date,
                due_date,
                interest_rate,
                description,
                total_amount: amount,
                remaining_balance: amount,
                installments: vec![],
                status: SettlementStatus::from_remaining(amount),
            },
        );
    }

    fn record_loan_installment(
        next: &mut LedgerSnapshot,
        loan_id: LoanId,
        amount: Money,
        date: NaiveDate,
        notes: String,
    ) -> Result<(), LedgerError> {
        let loan = next
            .loans
            .iter_mut()
            .find(|l| l.id == loan_id)
            .ok_or(LedgerError::LoanNotFound(loan_id))?;
        loan.installments.push(Installment {
            id: InstallmentId::new(),
            amount,
            date,
            notes,
        });
        loan.recompute();
        Ok(())
    }

    fn create_saving(
        next: &mut LedgerSnapshot,
        account_name: String,
        opening_balance: Money,
        bank: Option<String>,
        notes: Option<String>,
        date: NaiveDate,
    ) {
        next.savings.insert(
            0,
            Saving {
                id: SavingId::new(),
                account_name,
                bank,
                notes,
                date,
                opening_balance,
                current_balance: opening_balance,
                transactions: vec![],
            },
        );
    }

    fn record_saving_transaction(
        next: &mut LedgerSnapshot,
        saving_id: SavingId,
        kind: SavingTxnKind,
        amount: Money,
        date: NaiveDate,
        notes: String,
    ) {
        if let Some(saving) = Self::saving_mut(next, saving_id) {
            saving.transactions.push(SavingTxn {
                id: SavingTxnId::new(),
                kind,
                amount,
                date,
                notes,
            });
            saving.recompute();
        }
    }

    fn update_saving_transaction(
        next: &mut LedgerSnapshot,
        saving_id: SavingId,
        txn_id: SavingTxnId,
        updates: SavingTxnUpdate,
    ) {
        if let Some(saving) = Self::saving_mut(next, saving_id) {
            if let Some(txn) = saving.transactions.iter_mut().find(|t| t.id == txn_id) {
                updates.apply_to(txn);
            }
            saving.recompute();
        }
    }

    fn create_goods_debt(
        next: &mut LedgerSnapshot,
        customer_name: String,
        item_description: String,
        total_amount: Money,
        date: NaiveDate,
        due_date: Option<NaiveDate>,
        contact: Option<String>,
    ) {
        next.goods_debt.insert(
            0,
            GoodsDebt {
                id: DebtId::new(),
                customer_name,
                item_description,
                date,
                due_date,
                contact,
                total_amount,
                remaining_balance: total_amount,
                payments: vec![],
                status: SettlementStatus::from_remaining(total_amount),
            },
        );
    }

    fn record_owner_withdrawal(
        next: &mut LedgerSnapshot,
        amount: Money,
        account: Account,
        reason: String,
        date: NaiveDate,
        notes: String,
    ) {
        next.balance.apply(account, -amount);
        next.owner_withdrawals.insert(
            0,
            OwnerWithdrawal {
                id: WithdrawalId::new(),
                amount,
                account,
                reason,
                date,
                notes,
            },
        );
    }

    fn saving_mut(next: &mut LedgerSnapshot, saving_id: SavingId) -> Option<&mut Saving> {
        next.savings.iter_mut().find(|s| s.id == saving_id)
    }
}
