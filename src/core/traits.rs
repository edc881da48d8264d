//! Core traits for account persistence
//!
//! This module defines the persistence boundary that callers outside the core
//! are allowed to use. Every operation is a full read (and, for writes, a full
//! rewrite) of the backing store; nothing is cached between calls.

use crate::types::{Account, AccountNumber, StoreError};

/// First number handed out by an empty store
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 1000;

/// Trait for loading and persisting accounts
pub trait AccountStore {
    /// Load every well-formed account, in store order
    ///
    /// A store that does not exist yet loads as empty.
    fn load_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Append one account to the end of the store
    fn append_one(&self, account: &Account) -> Result<(), StoreError>;

    /// Remove the account with this number
    ///
    /// Returns `Ok(false)` and leaves the store untouched if none matched.
    fn remove_one(&self, number: AccountNumber) -> Result<bool, StoreError>;

    /// Overwrite the stored name and balance of the matching account
    ///
    /// Variant-specific state is not stored and is not updated. Returns
    /// `Ok(false)` if no account has this number.
    fn update_one(&self, updated: &Account) -> Result<bool, StoreError>;

    /// Rewrite the store with exactly these accounts, in order
    fn rewrite_all(&self, accounts: &[Account]) -> Result<(), StoreError>;

    /// Number for the next account to be created
    ///
    /// `FIRST_ACCOUNT_NUMBER` for an empty store, otherwise one more than the
    /// number of the *last* record. This relies on records being appended in
    /// ascending order; it is not a maximum scan.
    ///
    /// # Errors
    ///
    /// `StoreError::NumbersExhausted` if the last number is `u32::MAX`.
    fn next_account_number(&self) -> Result<AccountNumber, StoreError> {
        match self.load_all()?.last() {
            None => Ok(FIRST_ACCOUNT_NUMBER),
            Some(account) => account
                .number()
                .checked_add(1)
                .ok_or(StoreError::NumbersExhausted {
                    last: account.number(),
                }),
        }
    }
}
