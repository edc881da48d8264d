//! CSV export of account listings
//!
//! Writes accounts with columns: number, name, type, balance. Unlike the
//! stored record format, fields are properly quoted, so names containing
//! commas survive the export.

use crate::types::{round_cents, Account, AccountNumber};
use serde::Serialize;
use std::io::Write;

/// One exported row
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccountRow {
    pub number: AccountNumber,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: &'static str,
    pub balance: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        AccountRow {
            number: account.number(),
            name: account.name().to_string(),
            account_type: account.account_type().tag(),
            balance: format!("{:.2}", round_cents(account.balance())),
        }
    }
}

/// Write accounts as CSV, in the order given
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    if accounts.is_empty() {
        writer
            .write_record(["number", "name", "type", "balance"])
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;
    }

    for account in accounts {
        writer
            .serialize(AccountRow::from(account))
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::single_account(
        vec![Account::with_defaults(AccountType::Savings, "Alice", 1000, Decimal::new(100, 0))],
        "number,name,type,balance\n1000,Alice,Savings,100.00\n"
    )]
    #[case::keeps_store_order(
        vec![
            Account::with_defaults(AccountType::CertificateOfDeposit, "Bob", 1001, Decimal::new(25, 1)),
            Account::with_defaults(AccountType::ServiceChargeChecking, "Alice", 1000, Decimal::ZERO),
        ],
        "number,name,type,balance\n1001,Bob,CertificateOfDeposit,2.50\n1000,Alice,ServiceChargeChecking,0.00\n"
    )]
    #[case::quotes_commas(
        vec![Account::with_defaults(AccountType::Savings, "Smith, Alice", 1000, Decimal::ONE)],
        "number,name,type,balance\n1000,\"Smith, Alice\",Savings,1.00\n"
    )]
    #[case::empty_accounts(vec![], "number,name,type,balance\n")]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        let result = write_accounts_csv(&accounts, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }
}
