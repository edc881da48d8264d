//! Account-related types for the account store
//!
//! This module defines the `Account` structure shared by every account kind,
//! the `AccountKind` enum carrying variant-specific state, and the fieldless
//! `AccountType` enum used for type tags in the store file.
//!
//! Behavior (withdrawal rules, monthly processing) lives in `core::rules`.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Account identifier
///
/// Assigned monotonically by the store, starting at 1000.
pub type AccountNumber = u32;

/// Check quota for service charge checking before the excess fee applies
pub const MAXIMUM_NUM_OF_CHECKS: u32 = 5;

/// Round an amount to whole cents, half away from zero
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Default parameters for every account kind.
///
/// These are the values a record gets when it is reloaded from the store,
/// since variant parameters are not part of the stored record.
pub mod defaults {
    use rust_decimal::Decimal;

    /// Monthly fee for service charge checking (10.00)
    pub const SERVICE_CHARGE: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);
    /// Fee per check beyond the quota (5.00)
    pub const EXCESS_CHECK_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

    /// Minimum balance for no service charge checking (1000.00)
    pub const NO_SERVICE_MIN_BALANCE: Decimal = Decimal::from_parts(100000, 0, 0, false, 2);
    /// Interest rate for no service charge checking (0.02)
    pub const NO_SERVICE_INTEREST_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

    /// Minimum balance for high interest checking (5000.00)
    pub const HIGH_CHECKING_MIN_BALANCE: Decimal = Decimal::from_parts(500000, 0, 0, false, 2);
    /// Interest rate for high interest checking (0.05)
    pub const HIGH_CHECKING_INTEREST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

    /// Interest rate a savings account gets on reload (0.00)
    pub const SAVINGS_INTEREST_RATE: Decimal = Decimal::ZERO;

    /// Minimum balance for high interest savings (2500.00)
    pub const HIGH_SAVINGS_MIN_BALANCE: Decimal = Decimal::from_parts(250000, 0, 0, false, 2);
    /// Interest rate for high interest savings (0.005)
    pub const HIGH_SAVINGS_INTEREST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

    /// Interest rate for certificates of deposit (0.05)
    pub const CD_INTEREST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
    /// Term of a certificate of deposit in months
    pub const CD_MATURITY_MONTHS: u32 = 6;
}

/// The closed set of account kinds, without their state
///
/// Used for type tags in stored records and for display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    ServiceChargeChecking,
    NoServiceChargeChecking,
    HighInterestChecking,
    Savings,
    HighInterestSavings,
    CertificateOfDeposit,
}

impl AccountType {
    /// Tag resolution order for stored records
    pub const PRIORITY: [AccountType; 6] = [
        AccountType::ServiceChargeChecking,
        AccountType::NoServiceChargeChecking,
        AccountType::Savings,
        AccountType::HighInterestChecking,
        AccountType::HighInterestSavings,
        AccountType::CertificateOfDeposit,
    ];

    /// The tag written to the store file. Stable for the lifetime of the format.
    pub fn tag(&self) -> &'static str {
        match self {
            AccountType::ServiceChargeChecking => "ServiceChargeChecking",
            AccountType::NoServiceChargeChecking => "NoServiceChargeChecking",
            AccountType::HighInterestChecking => "HighInterestChecking",
            AccountType::Savings => "Savings",
            AccountType::HighInterestSavings => "HighInterestSavings",
            AccountType::CertificateOfDeposit => "CertificateOfDeposit",
        }
    }

    /// Human-readable name used in account summaries
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::ServiceChargeChecking => "Service Charge Checking",
            AccountType::NoServiceChargeChecking => "No Service Charge Checking",
            AccountType::HighInterestChecking => "High Interest Checking",
            AccountType::Savings => "Savings Account",
            AccountType::HighInterestSavings => "High Interest Savings",
            AccountType::CertificateOfDeposit => "Certificate of Deposit",
        }
    }

    /// Resolve a stored tag to an account type
    ///
    /// Matching is by substring, ignoring case and whitespace, so superstrings
    /// of a tag and the older spaced labels ("High Interest Savings") resolve.
    /// When several tags are contained in the input the longest one wins,
    /// with ties going to the earlier entry in [`AccountType::PRIORITY`].
    /// Anything unrecognized resolves to `NoServiceChargeChecking`.
    pub fn resolve(stored: &str) -> AccountType {
        let normalized: String = stored
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let mut best: Option<AccountType> = None;
        for candidate in AccountType::PRIORITY {
            if !normalized.contains(&candidate.tag().to_lowercase()) {
                continue;
            }
            match best {
                Some(current) if current.tag().len() >= candidate.tag().len() => {}
                _ => best = Some(candidate),
            }
        }

        best.unwrap_or(AccountType::NoServiceChargeChecking)
    }

    /// Whether checks can be written against this kind of account
    pub fn is_checking(&self) -> bool {
        matches!(
            self,
            AccountType::ServiceChargeChecking
                | AccountType::NoServiceChargeChecking
                | AccountType::HighInterestChecking
        )
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Variant-specific account state
#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    /// Checking with a monthly fee and a check quota
    ServiceChargeChecking {
        monthly_fee: Decimal,
        excess_check_fee: Decimal,
        checks_written: u32,
    },

    /// Fee-free checking that must stay above a minimum balance
    NoServiceChargeChecking {
        minimum_balance: Decimal,
        interest_rate: Decimal,
    },

    /// No service charge checking with a higher minimum and monthly interest
    HighInterestChecking {
        minimum_balance: Decimal,
        interest_rate: Decimal,
    },

    /// Savings with monthly interest and no withdrawal restriction
    Savings { interest_rate: Decimal },

    /// Savings that must stay above a minimum balance
    HighInterestSavings {
        interest_rate: Decimal,
        minimum_balance: Decimal,
    },

    /// Time deposit that can only be withdrawn in full after maturity
    CertificateOfDeposit {
        interest_rate: Decimal,
        maturity_months: u32,
        elapsed_months: u32,
    },
}

impl AccountKind {
    /// Default state for the given account type
    pub fn defaults(account_type: AccountType) -> Self {
        match account_type {
            AccountType::ServiceChargeChecking => AccountKind::ServiceChargeChecking {
                monthly_fee: defaults::SERVICE_CHARGE,
                excess_check_fee: defaults::EXCESS_CHECK_FEE,
                checks_written: 0,
            },
            AccountType::NoServiceChargeChecking => AccountKind::NoServiceChargeChecking {
                minimum_balance: defaults::NO_SERVICE_MIN_BALANCE,
                interest_rate: defaults::NO_SERVICE_INTEREST_RATE,
            },
            AccountType::HighInterestChecking => AccountKind::HighInterestChecking {
                minimum_balance: defaults::HIGH_CHECKING_MIN_BALANCE,
                interest_rate: defaults::HIGH_CHECKING_INTEREST_RATE,
            },
            AccountType::Savings => AccountKind::Savings {
                interest_rate: defaults::SAVINGS_INTEREST_RATE,
            },
            AccountType::HighInterestSavings => AccountKind::HighInterestSavings {
                interest_rate: defaults::HIGH_SAVINGS_INTEREST_RATE,
                minimum_balance: defaults::HIGH_SAVINGS_MIN_BALANCE,
            },
            AccountType::CertificateOfDeposit => AccountKind::CertificateOfDeposit {
                interest_rate: defaults::CD_INTEREST_RATE,
                maturity_months: defaults::CD_MATURITY_MONTHS,
                elapsed_months: 0,
            },
        }
    }

    /// Service charge checking with a custom monthly fee
    pub fn service_charge_checking(monthly_fee: Decimal) -> Self {
        AccountKind::ServiceChargeChecking {
            monthly_fee,
            excess_check_fee: defaults::EXCESS_CHECK_FEE,
            checks_written: 0,
        }
    }

    /// Savings with a custom interest rate
    pub fn savings(interest_rate: Decimal) -> Self {
        AccountKind::Savings { interest_rate }
    }

    /// Certificate of deposit with a custom rate and term
    pub fn certificate_of_deposit(interest_rate: Decimal, maturity_months: u32) -> Self {
        AccountKind::CertificateOfDeposit {
            interest_rate,
            maturity_months,
            elapsed_months: 0,
        }
    }

    /// The type tag for this state
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::ServiceChargeChecking { .. } => AccountType::ServiceChargeChecking,
            AccountKind::NoServiceChargeChecking { .. } => AccountType::NoServiceChargeChecking,
            AccountKind::HighInterestChecking { .. } => AccountType::HighInterestChecking,
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::HighInterestSavings { .. } => AccountType::HighInterestSavings,
            AccountKind::CertificateOfDeposit { .. } => AccountType::CertificateOfDeposit,
        }
    }

    /// Minimum balance enforced on withdrawals, if this kind has one
    pub fn minimum_balance(&self) -> Option<Decimal> {
        match self {
            AccountKind::NoServiceChargeChecking {
                minimum_balance, ..
            }
            | AccountKind::HighInterestChecking {
                minimum_balance, ..
            }
            | AccountKind::HighInterestSavings {
                minimum_balance, ..
            } => Some(*minimum_balance),
            _ => None,
        }
    }

    /// Interest rate, if this kind earns interest
    pub fn interest_rate(&self) -> Option<Decimal> {
        match self {
            AccountKind::ServiceChargeChecking { .. } => None,
            AccountKind::NoServiceChargeChecking { interest_rate, .. }
            | AccountKind::HighInterestChecking { interest_rate, .. }
            | AccountKind::Savings { interest_rate }
            | AccountKind::HighInterestSavings { interest_rate, .. }
            | AccountKind::CertificateOfDeposit { interest_rate, .. } => Some(*interest_rate),
        }
    }
}

/// An account held in the store
///
/// `number` is fixed at construction. `name` and `balance` can be overwritten
/// through [`Account::set_name`] and [`Account::set_balance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    name: String,
    number: AccountNumber,

    /// Current balance
    ///
    /// Can go negative through fees or `set_balance`, never through a validated
    /// withdrawal.
    balance: Decimal,

    kind: AccountKind,
}

impl Account {
    /// Create an account with explicit variant state
    pub fn new(
        name: impl Into<String>,
        number: AccountNumber,
        balance: Decimal,
        kind: AccountKind,
    ) -> Self {
        Account {
            name: name.into(),
            number,
            balance,
            kind,
        }
    }

    /// Create an account of the given type with that type's default parameters
    ///
    /// This is how records are rebuilt from the store.
    pub fn with_defaults(
        account_type: AccountType,
        name: impl Into<String>,
        number: AccountNumber,
        balance: Decimal,
    ) -> Self {
        Self::new(name, number, balance, AccountKind::defaults(account_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut AccountKind {
        &mut self.kind
    }

    /// The account's type tag
    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}\t ACCT# {}\tBalance: ${:.2}",
            self.account_type().label(),
            self.name,
            self.number,
            round_cents(self.balance)
        )
    }
}
