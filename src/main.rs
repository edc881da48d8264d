//! Rust Account Store CLI
//!
//! Command-line maintenance tool for the encrypted account store.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- list > accounts.csv
//! cargo run -- open --kind savings --name Alice --balance 100
//! cargo run -- deposit 1000 50
//! cargo run -- --store /srv/bank/accounts.txt monthly
//! RUST_LOG=info cargo run -- close 1000
//! ```
//!
//! Results go to stdout; logs and errors go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (store unreadable, lock held elsewhere, rule rejection, etc.)

use rust_account_store::{cli, logging};
use std::process;

fn main() {
    let args = cli::parse_args();
    logging::init_logging("warn");

    let mut output = std::io::stdout();
    if let Err(e) = cli::execute(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
