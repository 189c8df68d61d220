//! Property tests for the ledger invariants.

use proptest::prelude::*;

use super::allocation::PaymentTarget;
use super::command::Command;
use super::engine::LedgerEngine;
use super::types::{Account, LedgerSnapshot, SavingTxnKind, SettlementStatus, TransactionKind};
use chrono::NaiveDate;
use khata_shared::types::Money;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Strategy for positive amounts up to 1,000.00 in cents.
fn amount_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000).prop_map(Money::from_minor_units)
}

fn transaction_strategy() -> impl Strategy<Value = (TransactionKind, Account, Money)> {
    (any::<bool>(), any::<bool>(), amount_strategy()).prop_map(|(income, bank, amount)| {
        (
            if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            },
            if bank { Account::Bank } else { Account::Cash },
            amount,
        )
    })
}

fn saving_txn_strategy() -> impl Strategy<Value = (SavingTxnKind, Money)> {
    (any::<bool>(), amount_strategy()).prop_map(|(deposit, amount)| {
        (
            if deposit {
                SavingTxnKind::Deposit
            } else {
                SavingTxnKind::Withdrawal
            },
            amount,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Balance invariant: total == bank + cash after every mutation
    // ========================================================================

    #[test]
    fn prop_balance_total_equals_bank_plus_cash(
        txns in prop::collection::vec(transaction_strategy(), 1..25),
    ) {
        let mut snapshot = LedgerSnapshot::empty();
        for (kind, account, amount) in txns {
            snapshot = LedgerEngine::apply(&snapshot, Command::RecordTransaction {
                kind,
                account,
                amount,
                date: test_date(),
                description: String::new(),
                category: None,
            }).unwrap();
            prop_assert_eq!(
                snapshot.balance.total,
                snapshot.balance.bank + snapshot.balance.cash,
            );
        }
    }

    #[test]
    fn prop_balance_total_holds_with_withdrawals_mixed_in(
        txns in prop::collection::vec(transaction_strategy(), 1..15),
        withdrawals in prop::collection::vec((any::<bool>(), amount_strategy()), 1..10),
    ) {
        let mut snapshot = LedgerSnapshot::empty();
        for (kind, account, amount) in txns {
            snapshot = LedgerEngine::apply(&snapshot, Command::RecordTransaction {
                kind,
                account,
                amount,
                date: test_date(),
                description: String::new(),
                category: None,
            }).unwrap();
        }
        for (bank, amount) in withdrawals {
            snapshot = LedgerEngine::apply(&snapshot, Command::RecordOwnerWithdrawal {
                amount,
                account: if bank { Account::Bank } else { Account::Cash },
                reason: String::new(),
                date: test_date(),
                notes: String::new(),
            }).unwrap();
            prop_assert_eq!(
                snapshot.balance.total,
                snapshot.balance.bank + snapshot.balance.cash,
            );
        }
    }

    // ========================================================================
    // Loan invariant: remaining == max(0, total - sum(installments)),
    // paid iff remaining == 0
    // ========================================================================

    #[test]
    fn prop_loan_remaining_and_status(
        principal in amount_strategy(),
        installments in prop::collection::vec(amount_strategy(), 0..10),
    ) {
        let mut snapshot = LedgerEngine::apply(&LedgerSnapshot::empty(), Command::CreateLoan {
            person_name: "P".to_string(),
            amount: principal,
            interest_rate: rust_decimal::Decimal::ZERO,
            date: test_date(),
            due_date: None,
            description: None,
        }).unwrap();
        let loan_id = snapshot.loans[0].id;

        let mut paid = Money::ZERO;
        for amount in installments {
            paid += amount;
            snapshot = LedgerEngine::apply(&snapshot, Command::RecordLoanInstallment {
                loan_id,
                amount,
                date: test_date(),
                notes: String::new(),
            }).unwrap();

            let loan = &snapshot.loans[0];
            prop_assert_eq!(
                loan.remaining_balance,
                (principal - paid).clamp_non_negative(),
            );
            let expect_paid = loan.remaining_balance.is_zero();
            prop_assert_eq!(loan.status == SettlementStatus::Paid, expect_paid);
        }
    }

    // ========================================================================
    // Savings invariant: current == opening + sum(deposits) - sum(withdrawals)
    // ========================================================================

    #[test]
    fn prop_saving_balance_refolds(
        opening in (0i64..100_000).prop_map(Money::from_minor_units),
        txns in prop::collection::vec(saving_txn_strategy(), 1..15),
        delete_index in any::<prop::sample::Index>(),
    ) {
        let mut snapshot = LedgerEngine::apply(&LedgerSnapshot::empty(), Command::CreateSaving {
            account_name: "S".to_string(),
            opening_balance: opening,
            bank: None,
            notes: None,
            date: test_date(),
        }).unwrap();
        let saving_id = snapshot.savings[0].id;

        for (kind, amount) in &txns {
            snapshot = LedgerEngine::apply(&snapshot, Command::RecordSavingTransaction {
                saving_id,
                kind: *kind,
                amount: *amount,
                date: test_date(),
                notes: String::new(),
            }).unwrap();
        }

        // Delete one transaction; the fold must track the surviving list.
        let victim = delete_index.index(txns.len());
        let txn_id = snapshot.savings[0].transactions[victim].id;
        snapshot = LedgerEngine::apply(&snapshot, Command::DeleteSavingTransaction {
            saving_id,
            txn_id,
        }).unwrap();

        let saving = &snapshot.savings[0];
        let expected = saving.transactions.iter().fold(opening, |acc, t| match t.kind {
            SavingTxnKind::Deposit => acc + t.amount,
            SavingTxnKind::Withdrawal => acc - t.amount,
        });
        prop_assert_eq!(saving.current_balance, expected);
    }

    // ========================================================================
    // Allocation: money is conserved up to the documented clamp, balances
    // never go negative, status tracks remaining
    // ========================================================================

    #[test]
    fn prop_allocation_conserves_payment(
        remainings in prop::collection::vec(amount_strategy(), 1..6),
        payment_fraction in 1u32..=100,
    ) {
        let mut snapshot = LedgerSnapshot::empty();
        for remaining in &remainings {
            snapshot = LedgerEngine::apply(&snapshot, Command::CreateGoodsDebt {
                customer_name: "Alice".to_string(),
                item_description: String::new(),
                total_amount: *remaining,
                date: test_date(),
                due_date: None,
                contact: None,
            }).unwrap();
        }
        let total: Money = remainings.iter().copied().sum();
        let payment = Money::from_minor_units(
            (total.minor_units() * i64::from(payment_fraction)) / 100,
        );
        prop_assume!(payment.is_positive());

        let before: Money = snapshot.goods_debt.iter().map(|d| d.remaining_balance).sum();
        let open_count = snapshot.goods_debt.len() as i64;
        snapshot = LedgerEngine::apply(&snapshot, Command::RecordGoodsDebtPayment {
            customer: "alice".to_string(),
            amount: payment,
            apply_to: PaymentTarget::All,
            date: test_date(),
            notes: String::new(),
        }).unwrap();

        let applied: Money = snapshot
            .goods_debt
            .iter()
            .flat_map(|d| &d.payments)
            .map(|p| p.amount)
            .sum();
        let after: Money = snapshot.goods_debt.iter().map(|d| d.remaining_balance).sum();

        // Shares are rounded per debt; the unallocated tail is bounded by one
        // cent per participating debt and the rest lands on the first debt.
        prop_assert!(applied <= payment);
        prop_assert!(payment - applied <= Money::from_minor_units(open_count));
        prop_assert_eq!(after, before - applied);

        for debt in &snapshot.goods_debt {
            prop_assert!(!debt.remaining_balance.is_negative());
            let expect_paid = debt.remaining_balance.is_zero();
            prop_assert_eq!(debt.status == SettlementStatus::Paid, expect_paid);
        }
    }

    // ========================================================================
    // Full payment settles every open debt exactly
    // ========================================================================

    #[test]
    fn prop_full_payment_settles_customer(
        remainings in prop::collection::vec(amount_strategy(), 1..6),
    ) {
        let mut snapshot = LedgerSnapshot::empty();
        for remaining in &remainings {
            snapshot = LedgerEngine::apply(&snapshot, Command::CreateGoodsDebt {
                customer_name: "Alice".to_string(),
                item_description: String::new(),
                total_amount: *remaining,
                date: test_date(),
                due_date: None,
                contact: None,
            }).unwrap();
        }
        let total: Money = remainings.iter().copied().sum();

        snapshot = LedgerEngine::apply(&snapshot, Command::RecordGoodsDebtPayment {
            customer: "Alice".to_string(),
            amount: total,
            apply_to: PaymentTarget::All,
            date: test_date(),
            notes: String::new(),
        }).unwrap();

        for debt in &snapshot.goods_debt {
            prop_assert_eq!(debt.remaining_balance, Money::ZERO);
            prop_assert_eq!(debt.status, SettlementStatus::Paid);
        }
    }
}
