//! Proportional allocation of a customer payment across open goods debts.
//!
//! A customer often owes several line items at once. A single payment can be
//! spread pro rata over every open debt, or pinned to one debt. Because the
//! per-debt shares are rounded to cents independently, their sum can fall a
//! few cents short of the payment; the leftover goes to the first open debt
//! in original list order, clamped to what that debt can still absorb. With
//! amounts held in integer minor units the leftover is always a whole number
//! of cents, so allocation is exact and reproducible.

use chrono::{NaiveDate, Utc};
use khata_shared::types::{DebtId, Money, PaymentId};

use super::customer::normalize_customer_key;
use super::error::LedgerError;
use super::types::{GoodsDebt, Payment};

/// Which debts a customer payment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTarget {
    /// Split pro rata across every open debt of the customer.
    All,
    /// Apply to one specific debt only.
    Debt(DebtId),
}

/// Applies a customer payment to the debt list in place.
///
/// Preconditions checked before anything is mutated:
/// - `amount` is strictly positive,
/// - the customer has at least one open debt,
/// - `amount` does not exceed the sum of the customer's open balances.
///
/// Debts of other customers, and debts already settled, pass through
/// untouched.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`], [`LedgerError::NoActiveDebt`],
/// [`LedgerError::Overpayment`], or [`LedgerError::DebtNotFound`] when a
/// specific target is not among the customer's open debts.
pub(crate) fn record_customer_payment(
    debts: &mut [GoodsDebt],
    customer: &str,
    amount: Money,
    target: PaymentTarget,
    date: NaiveDate,
    notes: &str,
) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(amount));
    }

    let key = normalize_customer_key(customer);
    let open: Vec<usize> = debts
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_open() && normalize_customer_key(&d.customer_name) == key)
        .map(|(i, _)| i)
        .collect();

    if open.is_empty() {
        return Err(LedgerError::NoActiveDebt {
            customer: customer.trim().to_string(),
        });
    }

    let total_remaining: Money = open.iter().map(|&i| debts[i].remaining_balance).sum();
    if amount > total_remaining {
        return Err(LedgerError::Overpayment {
            attempted: amount,
            available: total_remaining,
        });
    }

    let shares = match target {
        PaymentTarget::All => {
            let mut shares: Vec<Money> = open
                .iter()
                .map(|&i| {
                    let ratio =
                        debts[i].remaining_balance.to_decimal() / total_remaining.to_decimal();
                    Money::from_decimal(amount.to_decimal() * ratio)
                })
                .collect();

            // Independent rounding can leave cents unallocated; they go to
            // the first open debt, clamped to its remaining balance.
            let allocated: Money = shares.iter().copied().sum();
            let leftover = amount - allocated;
            if leftover >= Money::from_minor_units(1) {
                shares[0] = (shares[0] + leftover).min(debts[open[0]].remaining_balance);
            }
            shares
        }
        PaymentTarget::Debt(debt_id) => {
            let position = open
                .iter()
                .position(|&i| debts[i].id == debt_id)
                .ok_or(LedgerError::DebtNotFound(debt_id))?;
            let mut shares = vec![Money::ZERO; open.len()];
            shares[position] = amount.min(debts[open[position]].remaining_balance);
            shares
        }
    };

    let timestamp = Utc::now();
    for (&i, share) in open.iter().zip(shares) {
        if share.is_positive() {
            debts[i].receive(Payment {
                id: PaymentId::new(),
                amount: share,
                date,
                notes: notes.to_string(),
                timestamp,
            });
        }
    }

    Ok(())
}
