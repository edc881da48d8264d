//! Error types for the account store
//!
//! This module defines all error types that can occur while loading, mutating
//! and persisting accounts. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Store Errors**: the store or staging file cannot be read or written
//! - **Cipher Errors**: an empty key was supplied to the XOR stream
//! - **Rejections**: a business rule refused a balance change (recoverable)
//! - **Lock Errors**: the advisory lock could not be taken (fail fast)
//! - **Session Errors**: everything a composed operation can report

use super::account::{AccountNumber, AccountType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Cipher codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The XOR stream needs at least one key byte
    #[error("Cipher key must not be empty")]
    EmptyKey,
}

/// Persistence engine errors
///
/// Failures detected before the overwrite step leave the store untouched.
/// A failure while the store itself is being written can leave it truncated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store file could not be read or written
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path of the store file
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// The staging file could not be written or read back
    ///
    /// This is a hard failure of the write path and is not retried.
    #[error("Staging file {path} unavailable: {message}")]
    Staging {
        /// Path of the staging file
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// The cipher rejected its key
    #[error("Cipher error: {0}")]
    Cipher(CipherError),

    /// The last stored number is the largest representable one
    #[error("No account numbers left after {last}")]
    NumbersExhausted {
        /// Number of the last record
        last: AccountNumber,
    },
}

impl From<CipherError> for StoreError {
    fn from(error: CipherError) -> Self {
        StoreError::Cipher(error)
    }
}

impl StoreError {
    /// Create an Io error for a path
    pub fn io(path: &std::path::Path, error: &std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Create a Staging error for a path
    pub fn staging(path: &std::path::Path, error: &std::io::Error) -> Self {
        StoreError::Staging {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

/// Business-rule rejection of a balance change
///
/// The account is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// The debit would take the balance below the account's minimum
    #[error("Withdrawal not allowed on account {number}: balance {balance} minus {requested} would fall below minimum balance {minimum}")]
    BelowMinimumBalance {
        /// Account number
        number: AccountNumber,
        /// Balance before the attempt
        balance: Decimal,
        /// Requested debit
        requested: Decimal,
        /// Minimum balance of the account
        minimum: Decimal,
    },

    /// A certificate of deposit was withdrawn before maturity
    #[error("CD {number} has not matured (month {elapsed} of {maturity}). No withdrawal.")]
    NotMatured {
        /// Account number
        number: AccountNumber,
        /// Months elapsed so far
        elapsed: u32,
        /// Term in months
        maturity: u32,
    },

    /// The operation does not apply to this kind of account
    #[error("{operation} is not supported for {account_type} account {number}")]
    Unsupported {
        /// Account number
        number: AccountNumber,
        /// Operation that was attempted
        operation: String,
        /// Kind of the account
        account_type: AccountType,
    },

    /// A transfer asked for more than the source account holds
    #[error("Insufficient funds in account {number}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        number: AccountNumber,
        /// Balance before the attempt
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// The new balance is outside the range of `Decimal`
    ///
    /// This is a recoverable error; the balance is left unchanged.
    #[error("Arithmetic overflow in {operation} for account {number}")]
    Overflow {
        /// Account number
        number: AccountNumber,
        /// Operation that would overflow
        operation: String,
    },
}

impl Rejection {
    /// Create a BelowMinimumBalance rejection
    pub fn below_minimum(
        number: AccountNumber,
        balance: Decimal,
        requested: Decimal,
        minimum: Decimal,
    ) -> Self {
        Rejection::BelowMinimumBalance {
            number,
            balance,
            requested,
            minimum,
        }
    }

    /// Create an Overflow rejection
    pub fn overflow(number: AccountNumber, operation: &str) -> Self {
        Rejection::Overflow {
            number,
            operation: operation.to_string(),
        }
    }

    /// Create an Unsupported rejection
    pub fn unsupported(number: AccountNumber, operation: &str, account_type: AccountType) -> Self {
        Rejection::Unsupported {
            number,
            operation: operation.to_string(),
            account_type,
        }
    }
}

/// Advisory lock errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The path could not be opened for read/write
    #[error("Unable to open {path} for locking: {message}")]
    Open {
        /// Path that was to be locked
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// Another holder has the lock
    #[error("{path} is in use by another session, try again later")]
    Contended {
        /// Path that is locked
        path: String,
    },
}

/// Errors reported by composed session operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// No stored account carries this number
    #[error("Account {number} not found")]
    AccountNotFound {
        /// Account number that was looked up
        number: AccountNumber,
    },

    /// Names end up in comma-separated, line-based records
    #[error("Invalid account name {name:?}: commas and line breaks cannot be stored")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {number} to itself")]
    SameAccount {
        /// Account number
        number: AccountNumber,
    },

    /// Amounts passed to deposits, withdrawals and checks must be positive
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },
}
