//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account data, variant state and type tags
//! - `error`: Error types for the account store

pub mod account;
pub mod error;

pub use account::{round_cents, Account, AccountKind, AccountNumber, AccountType};
pub use error::{CipherError, LockError, Rejection, SessionError, StoreError};
