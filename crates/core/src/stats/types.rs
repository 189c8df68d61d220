//! Summary figure types.

use khata_shared::types::Money;
use serde::Serialize;

/// Summary figures over one ledger snapshot.
///
/// Derived fresh on every call; nothing here is cached across mutations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Sum of loan principals.
    pub total_loan_amount: Money,
    /// Sum of loan amounts repaid, clamped at zero per loan.
    pub total_loan_paid: Money,
    /// Sum of loan remaining balances.
    pub total_loan_pending: Money,
    /// Sum of savings account balances.
    pub total_savings: Money,
    /// Sum of goods-debt totals.
    pub total_goods_debt: Money,
    /// Sum of goods-debt amounts paid, clamped at zero per record.
    pub total_goods_debt_paid: Money,
    /// Sum of goods-debt remaining balances.
    pub total_goods_debt_pending: Money,
    /// Sum of owner withdrawals.
    pub total_withdrawals: Money,
    /// Number of transactions dated today.
    pub todays_transactions: usize,
    /// Net of today's transactions (income minus expense).
    pub todays_net: Money,
}
