//! Stored record format for accounts
//!
//! One account per line: `accountNumber,name,typeTag,balance`, with the
//! balance always written with two fractional digits.
//!
//! Only the four common fields are stored. Decoding rebuilds the variant from
//! the type tag with that variant's default parameters, so interest rates,
//! fees, minimum balances and CD terms reset on every reload.
//!
//! Names are written as-is. A name containing a comma or a line break shifts
//! the remaining fields and the record will not decode back to the same
//! account; callers check names with [`is_storable_name`] first.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{round_cents, Account, AccountNumber, AccountType};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Encode an account as one stored line, including the trailing newline
pub fn encode(account: &Account) -> String {
    format!(
        "{},{},{},{:.2}\n",
        account.number(),
        account.name(),
        account.account_type().tag(),
        round_cents(account.balance())
    )
}

/// Whether `name` survives a round trip through a stored record
pub fn is_storable_name(name: &str) -> bool {
    !name.contains([',', '\n', '\r'])
}

/// Encode accounts in order, one line each
pub fn encode_all<'a, I>(accounts: I) -> String
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts.into_iter().map(encode).collect()
}

/// Decode one stored line
///
/// The first three fields are split on commas; the balance is the rest of the
/// line, with thousands separators removed. Returns `None` for a line with
/// missing fields or an unparsable number or balance.
pub fn decode(line: &str) -> Option<Account> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = line.splitn(4, ',');
    let number = fields.next()?;
    let name = fields.next()?;
    let tag = fields.next()?;
    let balance = fields.next()?;

    let number = AccountNumber::from_str(number.trim()).ok()?;
    let balance = Decimal::from_str(balance.replace(',', "").trim()).ok()?;

    Some(Account::with_defaults(
        AccountType::resolve(tag),
        name,
        number,
        balance,
    ))
}

/// Decode every well-formed line of a decrypted store, in file order
///
/// Malformed lines are skipped without error.
pub fn decode_all(content: &str) -> Vec<Account> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let decoded = decode(line);
            if decoded.is_none() {
                debug!(line = index + 1, "skipping malformed account record");
            }
            decoded
        })
        .collect()
}
