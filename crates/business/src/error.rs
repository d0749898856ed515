//! Business layer errors
//!
//! Repository key errors plus the wrapped core domain errors.

use bankapp_core::CoreError;
use thiserror::Error;

/// Banking operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankingError {
    // === Repository errors ===
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Client already exists: {0}")]
    DuplicateClient(String),

    // === Wrapped errors ===
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for banking operations
pub type BankingResult<T> = Result<T, BankingError>;

impl BankingError {
    /// Access the wrapped domain error, if any
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_client_not_found(&self) -> bool {
        matches!(self, Self::ClientNotFound(_))
    }

    pub fn is_duplicate_client(&self) -> bool {
        matches!(self, Self::DuplicateClient(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        self.as_core().is_some_and(CoreError::is_insufficient_funds)
    }

    pub fn is_active_account_not_set(&self) -> bool {
        self.as_core()
            .is_some_and(CoreError::is_active_account_not_set)
    }
}
