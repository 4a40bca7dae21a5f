//! Domain error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Each variant is a distinct failure kind so callers can branch on it:
/// a malformed amount needs fixing, insufficient funds may be retried with a
/// smaller amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The account identifier is not an acceptable email address.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// An amount is negative, has more than two decimal places or is out of range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The requested amount exceeds the current balance.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    /// A transfer was requested without a target account.
    #[error("target account cannot be missing")]
    MissingTarget,
}

impl DomainError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn insufficient_funds(balance: Money, requested: Money) -> Self {
        Self::InsufficientFunds { balance, requested }
    }

    pub fn missing_target() -> Self {
        Self::MissingTarget
    }
}
