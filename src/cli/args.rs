use crate::core::config::{StoreConfig, DEFAULT_PASSPHRASE, DEFAULT_STORE_FILE};
use crate::types::{AccountNumber, AccountType};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Maintain an encrypted flat-file account store
#[derive(Parser, Debug)]
#[command(name = "account-store")]
#[command(about = "Maintain an encrypted flat-file account store", long_about = None)]
pub struct CliArgs {
    /// Path of the encrypted store file
    #[arg(
        long = "store",
        value_name = "PATH",
        env = "ACCOUNT_STORE_PATH",
        default_value = DEFAULT_STORE_FILE
    )]
    pub store_path: PathBuf,

    /// Path of the plaintext staging file (default: beside the store)
    #[arg(long = "staging", value_name = "PATH", env = "ACCOUNT_STAGING_PATH")]
    pub staging_path: Option<PathBuf>,

    /// Passphrase the store key is derived from
    #[arg(
        long = "passphrase",
        value_name = "TEXT",
        env = "ACCOUNT_STORE_PASSPHRASE",
        default_value = DEFAULT_PASSPHRASE,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub passphrase: String,

    /// Operator name recorded in the logs
    #[arg(long = "operator", value_name = "NAME", default_value = "admin")]
    pub operator: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Command {
    /// Export every account as CSV
    List,

    /// Print the number the next account will get
    NextNumber,

    /// Open a new account
    Open {
        #[arg(long = "kind", value_name = "KIND")]
        kind: KindArg,

        #[arg(long = "name", value_name = "NAME")]
        name: String,

        #[arg(long = "balance", value_name = "AMOUNT", default_value = "0")]
        balance: Decimal,
    },

    /// Credit an account
    Deposit {
        number: AccountNumber,
        amount: Decimal,
    },

    /// Debit an account, subject to its minimum balance
    Withdraw {
        number: AccountNumber,
        amount: Decimal,
    },

    /// Write a check against a checking account
    Check {
        number: AccountNumber,
        amount: Decimal,
    },

    /// Move funds from one account to another
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    },

    /// Change the name on an account
    Rename {
        number: AccountNumber,
        name: String,
    },

    /// Pay out a matured certificate of deposit
    Redeem { number: AccountNumber },

    /// Close an account
    Close { number: AccountNumber },

    /// Post one monthly statement to every account
    Monthly,

    /// Print the fingerprint of a text
    Hash { text: String },
}

/// Kinds of account that can be opened
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    ServiceChargeChecking,
    NoServiceChargeChecking,
    HighInterestChecking,
    Savings,
    HighInterestSavings,
    CertificateOfDeposit,
}

impl From<KindArg> for AccountType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::ServiceChargeChecking => AccountType::ServiceChargeChecking,
            KindArg::NoServiceChargeChecking => AccountType::NoServiceChargeChecking,
            KindArg::HighInterestChecking => AccountType::HighInterestChecking,
            KindArg::Savings => AccountType::Savings,
            KindArg::HighInterestSavings => AccountType::HighInterestSavings,
            KindArg::CertificateOfDeposit => AccountType::CertificateOfDeposit,
        }
    }
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    ///
    /// Without `--staging` the staging file goes next to the store. Unusable
    /// paths fall back to defaults with a warning (see `StoreConfig::new`).
    pub fn to_store_config(&self) -> StoreConfig {
        match &self.staging_path {
            Some(staging) => {
                StoreConfig::new(&self.store_path, staging, self.passphrase.as_str())
            }
            None => StoreConfig {
                passphrase: self.passphrase.clone(),
                ..StoreConfig::for_store(&self.store_path)
            },
        }
    }
}
