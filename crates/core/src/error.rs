//! # Error Module
//!
//! Domain errors for BankApp accounts and clients, built with thiserror.

use crate::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Raised by [`Account`](crate::Account) and [`Client`](crate::Client)
/// operations. None of them leaves a partially applied mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Amount errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds on {account_id}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_id: AccountId,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Balance overflow on {account_id} while adding {amount}")]
    BalanceOverflow { account_id: AccountId, amount: Decimal },

    // === Client errors ===
    #[error("Active account not set for client: {0}")]
    ActiveAccountNotSet(String),

    #[error("Account {account_id} not found for client: {client}")]
    AccountNotFound { client: String, account_id: AccountId },
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid amount error for a non-positive operation amount
    pub fn non_positive(operation: &str, amount: Decimal) -> Self {
        Self::InvalidAmount(format!("{} amount must be positive: {}", operation, amount))
    }

    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, CoreError::InvalidAmount(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Check whether the error asks the caller to pick an active account
    pub fn is_active_account_not_set(&self) -> bool {
        matches!(self, CoreError::ActiveAccountNotSet(_))
    }
}
