//! Rust Account Store Library
//! # Overview
//!
//! This library persists bank accounts in a single XOR-obfuscated flat file
//! and applies the balance rules of each kind of account.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountKind, errors)
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`core`] - Business logic components:
//!   - [`core::rules`] - Deposits, withdrawals, checks and monthly statements
//!   - [`core::store`] - Decrypt, rewrite and reseal the store file
//!   - [`core::lock`] - Advisory lock around a whole operation
//!   - [`core::session`] - Operator-scoped locked operations
//! - [`io`] - Cipher, stored record format and CSV export
//! - [`logging`] - Subscriber setup for the binary
//!
//! # Account Types
//!
//! - **Service charge checking**: monthly fee, extra fee beyond five checks
//! - **No service charge checking**: minimum balance, no monthly processing
//! - **High interest checking**: higher minimum balance, monthly interest
//! - **Savings**: monthly interest, no minimum
//! - **High interest savings**: minimum balance, monthly interest
//! - **Certificate of deposit**: monthly interest, withdrawable only after
//!   its term
//!
//! # Stored Records
//!
//! After decryption the store holds one account per line:
//! `accountNumber,name,typeTag,balance`, with the balance at two decimals.
//! Variant parameters are not stored; accounts reload with their kind's
//! defaults.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use crate::core::{AccountStore, FileAccountStore, FileLock, Session, StoreConfig};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountKind, AccountNumber, AccountType, CipherError, LockError, Rejection,
    SessionError, StoreError,
};
