//! Store configuration
//!
//! Where the store and staging files live and which passphrase derives the
//! file key. Defaults match the layout existing store files were written with.

use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the encrypted store
pub const DEFAULT_STORE_FILE: &str = "accounts.txt";

/// File name of the plaintext staging file
pub const DEFAULT_STAGING_FILE: &str = "temp_accounts.txt";

/// Built-in passphrase existing store files are keyed with
pub const DEFAULT_PASSPHRASE: &str = "your_secret_key_here";

/// Configuration for a file-backed account store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the encrypted store file
    pub store_path: PathBuf,
    /// Path of the plaintext staging file used while rewriting the store
    pub staging_path: PathBuf,
    /// Passphrase the file key is derived from
    pub passphrase: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            staging_path: PathBuf::from(DEFAULT_STAGING_FILE),
            passphrase: DEFAULT_PASSPHRASE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a StoreConfig with custom values
    ///
    /// An empty store path falls back to the default. An empty staging path,
    /// or one equal to the store path, falls back to the default staging file
    /// name next to the store.
    pub fn new(
        store_path: impl Into<PathBuf>,
        staging_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        let default = Self::default();

        let store_path = store_path.into();
        let store_path = if store_path.as_os_str().is_empty() {
            warn!(
                "Invalid store path (empty), using default ({})",
                default.store_path.display()
            );
            default.store_path
        } else {
            store_path
        };

        let staging_path = staging_path.into();
        let staging_path = if staging_path.as_os_str().is_empty() || staging_path == store_path {
            let fallback = Self::staging_beside(&store_path);
            warn!(
                "Invalid staging path ({}), using {}",
                staging_path.display(),
                fallback.display()
            );
            fallback
        } else {
            staging_path
        };

        Self {
            store_path,
            staging_path,
            passphrase: passphrase.into(),
        }
    }

    /// Store at `store_path`, staging file beside it, default passphrase
    pub fn for_store(store_path: impl Into<PathBuf>) -> Self {
        let store_path = store_path.into();
        let staging_path = Self::staging_beside(&store_path);
        Self::new(store_path, staging_path, DEFAULT_PASSPHRASE)
    }

    fn staging_beside(store_path: &Path) -> PathBuf {
        match store_path.parent() {
            Some(parent) => parent.join(DEFAULT_STAGING_FILE),
            None => PathBuf::from(DEFAULT_STAGING_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = StoreConfig::default();
        assert_eq!(config.store_path, PathBuf::from("accounts.txt"));
        assert_eq!(config.staging_path, PathBuf::from("temp_accounts.txt"));
        assert_eq!(config.passphrase, "your_secret_key_here");
    }

    #[test]
    fn test_new_keeps_valid_values() {
        let config = StoreConfig::new("/data/a.bin", "/tmp/stage.txt", "secret");
        assert_eq!(config.store_path, PathBuf::from("/data/a.bin"));
        assert_eq!(config.staging_path, PathBuf::from("/tmp/stage.txt"));
        assert_eq!(config.passphrase, "secret");
    }

    #[test]
    fn test_new_empty_store_path_falls_back() {
        let config = StoreConfig::new("", "/tmp/stage.txt", "secret");
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_FILE));
    }

    #[test]
    fn test_new_staging_equal_to_store_falls_back_beside_store() {
        let config = StoreConfig::new("/data/accounts.txt", "/data/accounts.txt", "secret");
        assert_eq!(config.staging_path, PathBuf::from("/data/temp_accounts.txt"));
    }

    #[test]
    fn test_for_store_places_staging_beside_store() {
        let config = StoreConfig::for_store("/srv/bank/accounts.txt");
        assert_eq!(config.staging_path, PathBuf::from("/srv/bank/temp_accounts.txt"));
        assert_eq!(config.passphrase, DEFAULT_PASSPHRASE);
    }
}
