//! Summary figure derivation.

use chrono::NaiveDate;
use khata_shared::types::Money;

use super::types::LedgerStats;
use crate::ledger::types::{LedgerSnapshot, TransactionKind};

/// Service deriving summary figures from a snapshot.
///
/// Pure functions over in-memory data; `today` is passed in explicitly so
/// the derivation stays deterministic and testable.
pub struct StatsService;

impl StatsService {
    /// Computes the summary figures for a snapshot.
    #[must_use]
    pub fn compute(snapshot: &LedgerSnapshot, today: NaiveDate) -> LedgerStats {
        let total_loan_amount: Money = snapshot.loans.iter().map(|l| l.total_amount).sum();
        let total_loan_paid: Money = snapshot
            .loans
            .iter()
            .map(|l| (l.total_amount - l.remaining_balance).clamp_non_negative())
            .sum();
        let total_loan_pending: Money =
            snapshot.loans.iter().map(|l| l.remaining_balance).sum();

        let total_savings: Money = snapshot.savings.iter().map(|s| s.current_balance).sum();

        let total_goods_debt: Money =
            snapshot.goods_debt.iter().map(|d| d.total_amount).sum();
        let total_goods_debt_paid: Money = snapshot
            .goods_debt
            .iter()
            .map(|d| (d.total_amount - d.remaining_balance).clamp_non_negative())
            .sum();
        let total_goods_debt_pending: Money =
            snapshot.goods_debt.iter().map(|d| d.remaining_balance).sum();

        let total_withdrawals: Money =
            snapshot.owner_withdrawals.iter().map(|w| w.amount).sum();

        let todays: Vec<_> = snapshot
            .transactions
            .iter()
            .filter(|t| t.date == today)
            .collect();
        let todays_net = todays.iter().fold(Money::ZERO, |acc, t| match t.kind {
            TransactionKind::Income => acc + t.amount,
            TransactionKind::Expense => acc - t.amount,
        });

        LedgerStats {
            total_loan_amount,
            total_loan_paid,
            total_loan_pending,
            total_savings,
            total_goods_debt,
            total_goods_debt_paid,
            total_goods_debt_pending,
            total_withdrawals,
            todays_transactions: todays.len(),
            todays_net,
        }
    }
}
