//! Ledger error types.
//!
//! Every error here is returned before the snapshot is touched: a rejected
//! command leaves the ledger exactly as it was.

use khata_shared::AppError;
use khata_shared::types::{DebtId, LoanId, Money};
use thiserror::Error;

/// Errors that can occur while applying a ledger command.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Installment recorded against an unknown loan.
    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),

    /// Payment targeted a debt that is not one of the customer's open debts.
    #[error("Goods debt not found: {0}")]
    DebtNotFound(DebtId),

    /// Customer has no open goods debt to pay against.
    #[error("No active goods debt for customer '{customer}'")]
    NoActiveDebt {
        /// The customer name as submitted (trimmed).
        customer: String,
    },

    /// Payment exceeds everything the customer still owes.
    #[error("Payment {attempted} exceeds outstanding balance {available}")]
    Overpayment {
        /// Amount submitted.
        attempted: Money,
        /// Sum of remaining balances across the customer's open debts.
        available: Money,
    },

    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(Money),
}

impl LedgerError {
    /// Returns the error code for reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::LoanNotFound(_) => "LOAN_NOT_FOUND",
            Self::DebtNotFound(_) => "DEBT_NOT_FOUND",
            Self::NoActiveDebt { .. } => "NO_ACTIVE_DEBT",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::LoanNotFound(_) | LedgerError::DebtNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::NoActiveDebt { .. } | LedgerError::Overpayment { .. } => {
                Self::BusinessRule(err.to_string())
            }
            LedgerError::InvalidAmount(_) => Self::Validation(err.to_string()),
        }
    }
}
