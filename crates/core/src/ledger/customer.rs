//! Read-time grouping of goods debts into virtual customer rows.
//!
//! Customers are not a stored entity. Debt records sharing the same
//! normalized customer name are summed into one aggregate whenever a view
//! needs them; nothing here mutates the snapshot.

use chrono::NaiveDate;
use khata_shared::types::{DebtId, Money};
use serde::Serialize;
use std::collections::HashMap;

use super::types::{GoodsDebt, SettlementStatus};

/// Normalizes a customer name into its grouping key (trim + lowercase).
#[must_use]
pub fn normalize_customer_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Virtual aggregate over every goods debt of one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAggregate {
    /// Normalized grouping key.
    pub key: String,
    /// Customer name as first recorded.
    pub customer_name: String,
    /// Contact details from the first record carrying any.
    pub contact: Option<String>,
    /// Sum of `total_amount` over the customer's debts.
    pub total_amount: Money,
    /// Sum of amounts already paid.
    pub total_paid: Money,
    /// Sum of remaining balances.
    pub remaining_balance: Money,
    /// Active while anything is still owed.
    pub status: SettlementStatus,
    /// Latest debt date for the customer.
    pub last_transaction_date: NaiveDate,
    /// The line items contributing to this aggregate.
    pub debts: Vec<DebtId>,
}

/// Groups debts by normalized customer name, preserving first-seen order.
#[must_use]
pub fn group_by_customer(debts: &[GoodsDebt]) -> Vec<CustomerAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, CustomerAggregate> = HashMap::new();

    for debt in debts {
        let key = normalize_customer_key(&debt.customer_name);
        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            CustomerAggregate {
                key,
                customer_name: debt.customer_name.clone(),
                contact: debt.contact.clone(),
                total_amount: Money::ZERO,
                total_paid: Money::ZERO,
                remaining_balance: Money::ZERO,
                status: SettlementStatus::Paid,
                last_transaction_date: debt.date,
                debts: Vec::new(),
            }
        });

        entry.total_amount += debt.total_amount;
        entry.total_paid += debt.total_amount - debt.remaining_balance;
        entry.remaining_balance += debt.remaining_balance;
        entry.status = SettlementStatus::from_remaining(entry.remaining_balance);
        if debt.date > entry.last_transaction_date {
            entry.last_transaction_date = debt.date;
        }
        if entry.contact.is_none() {
            entry.contact = debt.contact.clone();
        }
        entry.debts.push(debt.id);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .collect()
}
