//! I/O module
//!
//! Handles everything that turns accounts into bytes and back.
//!
//! # Components
//!
//! - `cipher` - XOR obfuscation of the store file and DJB2 fingerprints
//! - `record_format` - One-line stored record encoding and decoding
//! - `export` - CSV listing output

pub mod cipher;
pub mod export;
pub mod record_format;

pub use cipher::{derive_key, hash, open_file, seal_file, xor_stream};
pub use export::{write_accounts_csv, AccountRow};
pub use record_format::{decode, decode_all, encode, encode_all, is_storable_name};
