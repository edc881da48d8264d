//! At-rest obfuscation for the store file
//!
//! This is a legacy weak scheme, kept for compatibility with existing store
//! files. Neither primitive here is cryptographic:
//! - [`hash`] is DJB2, used for password fingerprints and key derivation
//! - [`xor_stream`] XORs data with a repeating key, and is its own inverse
//!
//! The file helpers run whole-file contents through the same XOR routine in
//! both directions.

use crate::types::{CipherError, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// DJB2 seed
const HASH_SEED: u64 = 5381;

/// Hash a string with DJB2 and render it in decimal
///
/// `h = h * 33 + byte` over the UTF-8 bytes, starting from 5381, with 64-bit
/// wrapping arithmetic. Deterministic and order-sensitive, but trivially
/// collidable: do not rely on it for security.
///
/// Bytes are added as unsigned values (0 to 255). A fold over signed chars
/// gives a different digest for any text with bytes of 0x80 and above, so
/// keys for non-ASCII passphrases do not match such a fold. ASCII text
/// hashes the same either way.
pub fn hash(text: &str) -> String {
    text.bytes()
        .fold(HASH_SEED, |h, byte| {
            h.wrapping_shl(5).wrapping_add(h).wrapping_add(u64::from(byte))
        })
        .to_string()
}

/// Derive the file key from a passphrase
pub fn derive_key(passphrase: &str) -> Vec<u8> {
    hash(passphrase).into_bytes()
}

/// XOR every byte of `data` with the key, repeating the key as needed
///
/// Applying it twice with the same key returns the original data.
///
/// # Errors
///
/// Returns `CipherError::EmptyKey` if `key` is empty.
pub fn xor_stream(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return Err(CipherError::EmptyKey);
    }

    Ok(data
        .iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect())
}

/// Read the store file and decrypt it
///
/// A missing store is treated as empty content.
///
/// # Errors
///
/// - `StoreError::Io` if the file exists but cannot be read
/// - `StoreError::Cipher` if the key is empty
pub fn open_file(store: &Path, key: &[u8]) -> Result<Vec<u8>, StoreError> {
    let encrypted = match fs::read(store) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %store.display(), "store file missing, treating as empty");
            Vec::new()
        }
        Err(e) => return Err(StoreError::io(store, &e)),
    };

    Ok(xor_stream(&encrypted, key)?)
}

/// Encrypt the staging file's contents into the store file
///
/// The staging file is the source of truth: it must already hold the complete
/// plaintext. The store is overwritten in place.
///
/// # Errors
///
/// - `StoreError::Staging` if the staging file cannot be read
/// - `StoreError::Io` if the store cannot be written
/// - `StoreError::Cipher` if the key is empty
pub fn seal_file(staging: &Path, store: &Path, key: &[u8]) -> Result<(), StoreError> {
    let plaintext = fs::read(staging).map_err(|e| StoreError::staging(staging, &e))?;
    let encrypted = xor_stream(&plaintext, key)?;

    fs::write(store, encrypted).map_err(|e| StoreError::io(store, &e))?;

    debug!(
        staging = %staging.display(),
        store = %store.display(),
        bytes = plaintext.len(),
        "sealed store from staging file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::empty("", "5381")]
    #[case::single("a", "177670")]
    #[case::pair("ab", "5863208")]
    #[case::non_ascii_folds_unsigned_bytes("é", "5866513")]
    fn test_hash_known_values(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(hash(input), expected);
    }

    #[test]
    fn test_hash_is_order_sensitive() {
        assert_ne!(hash("ab"), hash("ba"));
        assert_eq!(hash("password"), hash("password"));
    }

    #[test]
    fn test_hash_wraps_instead_of_overflowing() {
        let long = "x".repeat(10_000);
        assert!(hash(&long).parse::<u64>().is_ok());
    }

    #[rstest]
    #[case::text(b"1000,Alice,Savings,100.00\n".as_slice(), b"k".as_slice())]
    #[case::longer_key(b"ab".as_slice(), b"a much longer key".as_slice())]
    #[case::binary(&[0u8, 255, 128, 7, 0][..], b"\x00\xff".as_slice())]
    #[case::empty_data(b"".as_slice(), b"key".as_slice())]
    fn test_xor_stream_is_self_inverse(#[case] data: &[u8], #[case] key: &[u8]) {
        let once = xor_stream(data, key).unwrap();
        let twice = xor_stream(&once, key).unwrap();
        assert_eq!(twice, data);
    }

    #[test]
    fn test_xor_stream_repeats_key() {
        let out = xor_stream(&[0, 0, 0, 0, 0], &[1, 2]).unwrap();
        assert_eq!(out, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_xor_stream_rejects_empty_key() {
        assert_eq!(xor_stream(b"data", b""), Err(CipherError::EmptyKey));
        assert_eq!(xor_stream(b"", b""), Err(CipherError::EmptyKey));
    }

    #[test]
    fn test_derive_key_is_hash_bytes() {
        assert_eq!(derive_key("a"), b"177670".to_vec());
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let content = open_file(&dir.path().join("accounts.txt"), b"key").unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_seal_then_open_recovers_plaintext() {
        let dir = TempDir::new().unwrap();
        let staging = dir.path().join("temp_accounts.txt");
        let store = dir.path().join("accounts.txt");
        let key = derive_key("passphrase");
        fs::write(&staging, "1000,Alice,Savings,100.00\n").unwrap();

        seal_file(&staging, &store, &key).unwrap();

        let on_disk = fs::read(&store).unwrap();
        assert_ne!(on_disk, b"1000,Alice,Savings,100.00\n".to_vec());
        assert_eq!(
            open_file(&store, &key).unwrap(),
            b"1000,Alice,Savings,100.00\n".to_vec()
        );
    }

    #[test]
    fn test_seal_without_staging_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("accounts.txt");

        let result = seal_file(&dir.path().join("missing.txt"), &store, b"key");

        assert!(matches!(result, Err(StoreError::Staging { .. })));
        assert!(!store.exists());
    }
}
