//! Operator session
//!
//! A `Session` is the context a front end works through: it carries the store,
//! the path guarding it and the name of the operator. Each composed operation
//! takes the advisory lock once, does its whole read-mutate-write cycle and
//! releases the lock before returning.

use crate::core::config::StoreConfig;
use crate::core::lock::FileLock;
use crate::core::store::FileAccountStore;
use crate::core::traits::AccountStore;
use crate::io::record_format::is_storable_name;
use crate::types::{
    Account, AccountKind, AccountNumber, AccountType, LockError, Rejection, SessionError,
};
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Operator context for locked account operations
#[derive(Debug)]
pub struct Session<S: AccountStore> {
    store: S,
    lock_path: PathBuf,
    operator: String,
}

impl Session<FileAccountStore> {
    /// Session over a file store, locking the store file itself
    pub fn open(config: StoreConfig, operator: impl Into<String>) -> Self {
        let lock_path = config.store_path.clone();
        Session::new(FileAccountStore::new(config), lock_path, operator)
    }
}

impl<S: AccountStore> Session<S> {
    pub fn new(store: S, lock_path: impl Into<PathBuf>, operator: impl Into<String>) -> Self {
        Session {
            store,
            lock_path: lock_path.into(),
            operator: operator.into(),
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Run `f` against the store while holding the lock
    ///
    /// The lock file is created empty if it does not exist yet.
    ///
    /// # Errors
    ///
    /// `SessionError::Lock` if the lock cannot be taken, otherwise whatever
    /// `f` returns.
    pub fn run_locked<T, F>(&self, operation: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&S) -> Result<T, SessionError>,
    {
        self.ensure_lock_file()?;
        let lock = FileLock::acquire(&self.lock_path)?;
        debug!(operator = %self.operator, operation, "running locked operation");

        let result = f(&self.store);

        lock.release();
        result
    }

    /// Open a new account with the next free number
    ///
    /// The name is checked before the store is touched: a name the record
    /// format cannot hold would be dropped on reload and its number handed
    /// out again.
    pub fn open_account(
        &self,
        name: &str,
        kind: AccountKind,
        opening_balance: Decimal,
    ) -> Result<Account, SessionError> {
        require_storable_name(name)?;
        if opening_balance < Decimal::ZERO {
            return Err(SessionError::InvalidAmount {
                amount: opening_balance,
            });
        }

        self.run_locked("open_account", |store| {
            let number = store.next_account_number()?;
            let account = Account::new(name, number, opening_balance, kind);
            store.append_one(&account)?;

            info!(
                operator = %self.operator,
                account = number,
                account_type = %account.account_type(),
                "opened account"
            );
            Ok(account)
        })
    }

    pub fn deposit(&self, number: AccountNumber, amount: Decimal) -> Result<Account, SessionError> {
        require_positive(amount)?;
        self.modify("deposit", number, |account| account.deposit(amount))
            .map(|(account, ())| account)
    }

    pub fn withdraw(&self, number: AccountNumber, amount: Decimal) -> Result<Account, SessionError> {
        require_positive(amount)?;
        self.modify("withdraw", number, |account| account.withdraw(amount))
            .map(|(account, ())| account)
    }

    pub fn write_check(
        &self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, SessionError> {
        require_positive(amount)?;
        self.modify("write_check", number, |account| account.write_check(amount))
            .map(|(account, ())| account)
    }

    /// Move `amount` from one account to another under a single lock
    ///
    /// The source must hold at least `amount` and its kind's withdrawal rule
    /// must allow the debit. Certificates of deposit cannot be a source. Both
    /// balances are written in one rewrite, and nothing is written if either
    /// side is rejected.
    ///
    /// Returns the updated source and destination accounts.
    pub fn transfer(
        &self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(Account, Account), SessionError> {
        require_positive(amount)?;
        if from == to {
            return Err(SessionError::SameAccount { number: from });
        }

        self.run_locked("transfer", |store| {
            let mut accounts = store.load_all()?;
            let source = find_index(&accounts, from)?;
            let destination = find_index(&accounts, to)?;

            let mut debited = accounts[source].clone();
            if debited.account_type() == AccountType::CertificateOfDeposit {
                let rejection =
                    Rejection::unsupported(from, "transfer", AccountType::CertificateOfDeposit);
                warn!("{}", rejection);
                return Err(rejection.into());
            }
            if amount > debited.balance() {
                let rejection = Rejection::InsufficientFunds {
                    number: from,
                    balance: debited.balance(),
                    requested: amount,
                };
                warn!("{}", rejection);
                return Err(rejection.into());
            }
            debited.withdraw(amount)?;

            let mut credited = accounts[destination].clone();
            credited.deposit(amount)?;

            accounts[source] = debited.clone();
            accounts[destination] = credited.clone();
            store.rewrite_all(&accounts)?;

            info!(
                operator = %self.operator,
                from,
                to,
                %amount,
                "transferred funds"
            );
            Ok((debited, credited))
        })
    }

    /// Change the name on an account
    pub fn rename(&self, number: AccountNumber, name: &str) -> Result<Account, SessionError> {
        require_storable_name(name)?;
        self.modify("rename", number, |account| {
            account.set_name(name);
            Ok(())
        })
        .map(|(account, ())| account)
    }

    /// Pay out a matured certificate of deposit
    ///
    /// Returns the updated account and the amount paid out.
    pub fn redeem_certificate(
        &self,
        number: AccountNumber,
    ) -> Result<(Account, Decimal), SessionError> {
        self.modify("redeem_certificate", number, Account::withdraw_matured)
    }

    pub fn close_account(&self, number: AccountNumber) -> Result<(), SessionError> {
        self.run_locked("close_account", |store| {
            if !store.remove_one(number)? {
                return Err(SessionError::AccountNotFound { number });
            }
            info!(operator = %self.operator, account = number, "closed account");
            Ok(())
        })
    }

    /// Apply one monthly statement to every account, in a single rewrite
    ///
    /// Returns the number of accounts processed. If any statement is rejected
    /// nothing is written.
    pub fn post_monthly_statements(&self) -> Result<usize, SessionError> {
        self.run_locked("post_monthly_statements", |store| {
            let mut accounts = store.load_all()?;
            for account in &mut accounts {
                account.create_monthly_statement()?;
            }
            store.rewrite_all(&accounts)?;

            info!(
                operator = %self.operator,
                count = accounts.len(),
                "posted monthly statements"
            );
            Ok(accounts.len())
        })
    }

    pub fn accounts(&self) -> Result<Vec<Account>, SessionError> {
        self.run_locked("accounts", |store| Ok(store.load_all()?))
    }

    pub fn next_account_number(&self) -> Result<AccountNumber, SessionError> {
        self.run_locked("next_account_number", |store| {
            Ok(store.next_account_number()?)
        })
    }

    /// Load one account, apply `f` and persist the result
    ///
    /// Nothing is written if `f` rejects the change.
    fn modify<T, F>(
        &self,
        operation: &str,
        number: AccountNumber,
        f: F,
    ) -> Result<(Account, T), SessionError>
    where
        F: FnOnce(&mut Account) -> Result<T, Rejection>,
    {
        self.run_locked(operation, |store| {
            let mut account = store
                .load_all()?
                .into_iter()
                .find(|account| account.number() == number)
                .ok_or(SessionError::AccountNotFound { number })?;

            let outcome = f(&mut account)?;

            if !store.update_one(&account)? {
                return Err(SessionError::AccountNotFound { number });
            }

            info!(
                operator = %self.operator,
                operation,
                account = number,
                balance = %account.balance(),
                "account updated"
            );
            Ok((account, outcome))
        })
    }

    fn ensure_lock_file(&self) -> Result<(), LockError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.lock_path)
            .map(|_| ())
            .map_err(|e| LockError::Open {
                path: self.lock_path.display().to_string(),
                message: e.to_string(),
            })
    }
}

fn find_index(accounts: &[Account], number: AccountNumber) -> Result<usize, SessionError> {
    accounts
        .iter()
        .position(|account| account.number() == number)
        .ok_or(SessionError::AccountNotFound { number })
}

fn require_storable_name(name: &str) -> Result<(), SessionError> {
    if !is_storable_name(name) {
        return Err(SessionError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn require_positive(amount: Decimal) -> Result<(), SessionError> {
    if amount <= Decimal::ZERO {
        return Err(SessionError::InvalidAmount { amount });
    }
    Ok(())
}
