//! File-backed account store
//!
//! `FileAccountStore` owns the single encrypted store file. Every operation
//! runs a full cycle:
//!
//! ```text
//! decrypt store -> decode all -> (mutate in memory) -> encode all
//!     -> write staging file -> seal store from staging file
//! ```
//!
//! The seal step reads the staging file back rather than using the in-memory
//! buffer, so a write is only as good as the staging file. If the staging
//! write fails the store is left untouched; if the store write itself fails
//! the store may be truncated, and nothing rolls it back.
//!
//! There is no locking here. Callers that need mutual exclusion wrap a whole
//! logical operation in a `core::lock::FileLock` (see `core::session`).

use crate::core::config::StoreConfig;
use crate::core::traits::AccountStore;
use crate::io::cipher::{derive_key, open_file, seal_file};
use crate::io::record_format::{decode_all, encode, encode_all};
use crate::types::{Account, AccountNumber, StoreError};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Account store persisted in one XOR-obfuscated flat file
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    config: StoreConfig,
    key: Vec<u8>,
}

impl FileAccountStore {
    /// Create a store for the configured paths
    ///
    /// Nothing is read or created until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        let key = derive_key(&config.passphrase);
        FileAccountStore { config, key }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn store_path(&self) -> &Path {
        &self.config.store_path
    }

    /// Decrypt the whole store
    ///
    /// The bytes are returned as stored. Only decoding treats them as text,
    /// so appending never rewrites existing records.
    fn read_plaintext(&self) -> Result<Vec<u8>, StoreError> {
        open_file(&self.config.store_path, &self.key)
    }

    /// Write `plaintext` to the staging file, then seal the store from it
    fn stage_and_seal(&self, plaintext: &[u8]) -> Result<(), StoreError> {
        let staging = &self.config.staging_path;

        fs::write(staging, plaintext).map_err(|e| StoreError::staging(staging, &e))?;
        seal_file(staging, &self.config.store_path, &self.key)?;

        if let Err(e) = fs::remove_file(staging) {
            warn!(
                path = %staging.display(),
                error = %e,
                "failed to remove staging file"
            );
        }
        Ok(())
    }
}

impl AccountStore for FileAccountStore {
    fn load_all(&self) -> Result<Vec<Account>, StoreError> {
        let plaintext = self.read_plaintext()?;
        let accounts = decode_all(&String::from_utf8_lossy(&plaintext));
        debug!(count = accounts.len(), "loaded accounts");
        Ok(accounts)
    }

    fn append_one(&self, account: &Account) -> Result<(), StoreError> {
        let mut content = self.read_plaintext()?;
        if !content.is_empty() && !content.ends_with(b"\n") {
            content.push(b'\n');
        }
        content.extend_from_slice(encode(account).as_bytes());

        self.stage_and_seal(&content)?;
        info!(account = account.number(), "appended account");
        Ok(())
    }

    fn remove_one(&self, number: AccountNumber) -> Result<bool, StoreError> {
        let mut accounts = self.load_all()?;
        let before = accounts.len();
        accounts.retain(|account| account.number() != number);

        if accounts.len() == before {
            debug!(account = number, "no account to remove");
            return Ok(false);
        }

        self.rewrite_all(&accounts)?;
        info!(account = number, "removed account");
        Ok(true)
    }

    fn update_one(&self, updated: &Account) -> Result<bool, StoreError> {
        let mut accounts = self.load_all()?;

        let Some(stored) = accounts
            .iter_mut()
            .find(|account| account.number() == updated.number())
        else {
            debug!(account = updated.number(), "no account to update");
            return Ok(false);
        };

        stored.set_name(updated.name());
        stored.set_balance(updated.balance());

        self.rewrite_all(&accounts)?;
        info!(account = updated.number(), "updated account");
        Ok(true)
    }

    fn rewrite_all(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.stage_and_seal(encode_all(accounts).as_bytes())
    }
}
