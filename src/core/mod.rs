//! Core business logic module
//!
//! This module contains the account store components:
//! - `rules` - Balance rules for each kind of account
//! - `traits` - The persistence boundary
//! - `store` - Encrypted flat-file store implementing it
//! - `lock` - Advisory whole-file lock
//! - `session` - Locked, operator-scoped composed operations
//! - `config` - Store file locations and passphrase

pub mod config;
pub mod lock;
pub mod rules;
pub mod session;
pub mod store;
pub mod traits;

pub use config::StoreConfig;
pub use lock::FileLock;
pub use session::Session;
pub use store::FileAccountStore;
pub use traits::{AccountStore, FIRST_ACCOUNT_NUMBER};
