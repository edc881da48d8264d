//! Balance-mutation rules for every account kind
//!
//! This module implements the behavior half of the account model on top of
//! the data types in `types::account`:
//! - Deposits (uniform across kinds)
//! - Withdrawals, with minimum-balance and maturity restrictions
//! - Check writing for the checking kinds
//! - Monthly statement processing (fees, interest, CD term tracking)
//!
//! Rule violations never panic. The account is left unchanged, a rejection
//! notice is logged and the `Rejection` is returned to the caller. Balance
//! arithmetic is checked, so a result outside the range of `Decimal` is a
//! `Rejection::Overflow` rather than a panic.

use crate::types::account::MAXIMUM_NUM_OF_CHECKS;
use crate::types::{Account, AccountKind, AccountNumber, AccountType, Rejection};
use rust_decimal::Decimal;
use tracing::{debug, warn};

impl Account {
    /// Credit the account
    ///
    /// No validation of sign; callers check the amount before depositing.
    ///
    /// # Errors
    ///
    /// Returns `Rejection::Overflow` if the new balance is out of range.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        let new_balance = self
            .balance()
            .checked_add(amount)
            .ok_or_else(|| reject(Rejection::overflow(self.number(), "deposit")))?;

        self.set_balance(new_balance);
        Ok(())
    }

    /// Debit the account, subject to the rules of its kind
    ///
    /// - Service charge checking and savings debit unconditionally.
    /// - Kinds with a minimum balance debit only if the resulting balance stays
    ///   at or above the minimum.
    /// - Certificates of deposit ignore amount withdrawals entirely; use
    ///   [`Account::withdraw_matured`].
    ///
    /// # Errors
    ///
    /// Returns `Rejection::BelowMinimumBalance` if the debit would break the
    /// minimum balance, or `Rejection::Overflow` if the result is out of range.
    /// The balance is unchanged in both cases.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        if self.account_type() == AccountType::CertificateOfDeposit {
            debug!(
                account = self.number(),
                %amount,
                "amount withdrawal ignored for certificate of deposit"
            );
            return Ok(());
        }

        self.debit_above_minimum(amount, "withdraw")
    }

    /// Withdraw the whole balance of a matured certificate of deposit
    ///
    /// A CD matures once more months have elapsed than its term. The balance
    /// is set to zero and the amount paid out is returned.
    ///
    /// # Errors
    ///
    /// - `Rejection::NotMatured` while the CD is still within its term
    /// - `Rejection::Unsupported` for any other kind of account
    pub fn withdraw_matured(&mut self) -> Result<Decimal, Rejection> {
        let number = self.number();
        let balance = self.balance();

        let term = match self.kind() {
            AccountKind::CertificateOfDeposit {
                maturity_months,
                elapsed_months,
                ..
            } => Some((*elapsed_months, *maturity_months)),
            _ => None,
        };

        let rejection = match term {
            Some((elapsed, maturity)) if elapsed > maturity => {
                self.set_balance(Decimal::ZERO);
                return Ok(balance);
            }
            Some((elapsed, maturity)) => Rejection::NotMatured {
                number,
                elapsed,
                maturity,
            },
            None => Rejection::unsupported(number, "withdraw_matured", self.account_type()),
        };

        Err(reject(rejection))
    }

    /// Write a check against a checking account
    ///
    /// Service charge checking debits the check plus the excess-check fee once
    /// the monthly quota has been used, and counts the check. The other
    /// checking kinds apply their minimum balance rule.
    ///
    /// # Errors
    ///
    /// - `Rejection::BelowMinimumBalance` if the minimum balance would be broken
    /// - `Rejection::Unsupported` for savings and certificates of deposit
    /// - `Rejection::Overflow` if the new balance is out of range; the check
    ///   is not counted in that case
    pub fn write_check(&mut self, amount: Decimal) -> Result<(), Rejection> {
        let number = self.number();
        let balance = self.balance();

        let quota = match self.kind() {
            AccountKind::ServiceChargeChecking {
                excess_check_fee,
                checks_written,
                ..
            } => Some((*excess_check_fee, *checks_written)),
            _ => None,
        };

        if let Some((excess_check_fee, checks_written)) = quota {
            let charge = if checks_written < MAXIMUM_NUM_OF_CHECKS {
                Some(amount)
            } else {
                amount.checked_add(excess_check_fee)
            };
            let new_balance = charge
                .and_then(|charge| balance.checked_sub(charge))
                .ok_or_else(|| reject(Rejection::overflow(number, "write_check")))?;

            if let AccountKind::ServiceChargeChecking { checks_written, .. } = self.kind_mut() {
                *checks_written += 1;
            }
            self.set_balance(new_balance);
            return Ok(());
        }

        if !self.account_type().is_checking() {
            return Err(reject(Rejection::unsupported(
                number,
                "write_check",
                self.account_type(),
            )));
        }

        self.debit_above_minimum(amount, "write_check")
    }

    /// Apply one month of processing
    ///
    /// Each call applies its effect once: calling it N times deducts the fee or
    /// posts interest N times.
    ///
    /// - Service charge checking: deduct the monthly fee
    /// - No service charge checking: nothing
    /// - High interest checking, savings, high interest savings: post interest
    /// - Certificate of deposit: post interest and advance the term by a month
    ///
    /// # Errors
    ///
    /// Returns `Rejection::Overflow` if the new balance is out of range. The
    /// balance and the CD term are unchanged in that case.
    pub fn create_monthly_statement(&mut self) -> Result<(), Rejection> {
        let number = self.number();
        let balance = self.balance();

        let new_balance = match self.kind() {
            AccountKind::ServiceChargeChecking { monthly_fee, .. } => {
                balance.checked_sub(*monthly_fee)
            }
            AccountKind::NoServiceChargeChecking { .. } => Some(balance),
            AccountKind::HighInterestChecking { interest_rate, .. }
            | AccountKind::Savings { interest_rate }
            | AccountKind::HighInterestSavings { interest_rate, .. }
            | AccountKind::CertificateOfDeposit { interest_rate, .. } => {
                post_interest(balance, *interest_rate)
            }
        }
        .ok_or_else(|| reject(Rejection::overflow(number, "monthly_statement")))?;

        if let AccountKind::CertificateOfDeposit { elapsed_months, .. } = self.kind_mut() {
            *elapsed_months += 1;
        }
        self.set_balance(new_balance);
        Ok(())
    }

    /// Debit `amount` unless it would take the balance below the minimum
    fn debit_above_minimum(&mut self, amount: Decimal, operation: &str) -> Result<(), Rejection> {
        let number: AccountNumber = self.number();
        let balance = self.balance();

        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| reject(Rejection::overflow(number, operation)))?;

        if let Some(minimum) = self.kind().minimum_balance() {
            if new_balance < minimum {
                return Err(reject(Rejection::below_minimum(
                    number, balance, amount, minimum,
                )));
            }
        }

        self.set_balance(new_balance);
        Ok(())
    }
}

/// `balance + balance * rate`, or `None` if it leaves the range of `Decimal`
fn post_interest(balance: Decimal, rate: Decimal) -> Option<Decimal> {
    balance
        .checked_mul(rate)
        .and_then(|interest| balance.checked_add(interest))
}

/// Log a rejection notice and hand the rejection back
fn reject(rejection: Rejection) -> Rejection {
    warn!("{}", rejection);
    rejection
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn account(account_type: AccountType, balance: Decimal) -> Account {
        Account::with_defaults(account_type, "Alice", 1000, balance)
    }

    fn checks_written(account: &Account) -> u32 {
        match account.kind() {
            AccountKind::ServiceChargeChecking { checks_written, .. } => *checks_written,
            other => panic!("Expected service charge checking, got {:?}", other),
        }
    }

    fn elapsed_months(account: &Account) -> u32 {
        match account.kind() {
            AccountKind::CertificateOfDeposit { elapsed_months, .. } => *elapsed_months,
            other => panic!("Expected certificate of deposit, got {:?}", other),
        }
    }

    #[rstest]
    #[case::service_charge(AccountType::ServiceChargeChecking)]
    #[case::no_service_charge(AccountType::NoServiceChargeChecking)]
    #[case::high_checking(AccountType::HighInterestChecking)]
    #[case::savings(AccountType::Savings)]
    #[case::high_savings(AccountType::HighInterestSavings)]
    #[case::cd(AccountType::CertificateOfDeposit)]
    fn test_deposit_credits_every_kind(#[case] account_type: AccountType) {
        let mut account = account(account_type, Decimal::new(10000, 2));

        account.deposit(Decimal::new(5050, 2)).unwrap();

        assert_eq!(account.balance(), Decimal::new(15050, 2));
    }

    #[test]
    fn test_deposit_does_not_validate_sign() {
        let mut account = account(AccountType::Savings, Decimal::new(100, 0));
        account.deposit(Decimal::new(-30, 0)).unwrap();
        assert_eq!(account.balance(), Decimal::new(70, 0));
    }

    #[rstest]
    #[case::service_charge(AccountType::ServiceChargeChecking)]
    #[case::savings(AccountType::Savings)]
    fn test_unrestricted_withdraw_can_overdraw(#[case] account_type: AccountType) {
        let mut account = account(account_type, Decimal::new(100, 0));

        let result = account.withdraw(Decimal::new(150, 0));

        assert!(result.is_ok());
        assert_eq!(account.balance(), Decimal::new(-50, 0));
    }

    #[rstest]
    #[case::exactly_minimum(Decimal::new(1000, 0), Decimal::ZERO, true, Decimal::new(1000, 0))]
    #[case::one_below_minimum(Decimal::new(1000, 0), Decimal::ONE, false, Decimal::new(1000, 0))]
    #[case::lands_on_minimum(Decimal::new(1500, 0), Decimal::new(500, 0), true, Decimal::new(1000, 0))]
    #[case::cent_below_minimum(Decimal::new(1500, 0), Decimal::new(50001, 2), false, Decimal::new(1500, 0))]
    fn test_no_service_charge_minimum_balance(
        #[case] balance: Decimal,
        #[case] amount: Decimal,
        #[case] allowed: bool,
        #[case] expected_balance: Decimal,
    ) {
        let mut account = account(AccountType::NoServiceChargeChecking, balance);

        let result = account.withdraw(amount);

        assert_eq!(result.is_ok(), allowed);
        assert_eq!(account.balance(), expected_balance);
    }

    #[test]
    fn test_rejected_withdraw_reports_minimum() {
        let mut account = account(AccountType::HighInterestChecking, Decimal::new(6000, 0));

        let result = account.withdraw(Decimal::new(1001, 0));

        assert_eq!(
            result.unwrap_err(),
            Rejection::BelowMinimumBalance {
                number: 1000,
                balance: Decimal::new(6000, 0),
                requested: Decimal::new(1001, 0),
                minimum: Decimal::new(5000, 0),
            }
        );
        assert_eq!(account.balance(), Decimal::new(6000, 0));
    }

    #[test]
    fn test_high_interest_savings_minimum_balance() {
        let mut account = account(AccountType::HighInterestSavings, Decimal::new(3000, 0));

        assert!(account.withdraw(Decimal::new(500, 0)).is_ok());
        assert_eq!(account.balance(), Decimal::new(2500, 0));

        assert!(matches!(
            account.withdraw(Decimal::new(1, 2)),
            Err(Rejection::BelowMinimumBalance { .. })
        ));
        assert_eq!(account.balance(), Decimal::new(2500, 0));
    }

    #[test]
    fn test_cd_amount_withdraw_is_a_no_op() {
        let mut account = account(AccountType::CertificateOfDeposit, Decimal::new(1000, 0));

        let result = account.withdraw(Decimal::new(100, 0));

        assert!(result.is_ok());
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_cd_rejects_withdrawal_within_term() {
        let mut account = account(AccountType::CertificateOfDeposit, Decimal::new(1000, 0));

        for _ in 0..6 {
            account.create_monthly_statement().unwrap();
            let balance = account.balance();
            assert!(matches!(
                account.withdraw_matured(),
                Err(Rejection::NotMatured { maturity: 6, .. })
            ));
            assert_eq!(account.balance(), balance);
        }
        assert_eq!(elapsed_months(&account), 6);
    }

    #[test]
    fn test_cd_withdraws_everything_after_maturity() {
        let mut account = account(AccountType::CertificateOfDeposit, Decimal::new(1000, 0));

        for _ in 0..7 {
            account.create_monthly_statement().unwrap();
        }
        let balance = account.balance();

        let paid_out = account.withdraw_matured().unwrap();

        assert_eq!(paid_out, balance);
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_matured_unsupported_for_savings() {
        let mut account = account(AccountType::Savings, Decimal::new(1000, 0));

        let result = account.withdraw_matured();

        assert!(matches!(result, Err(Rejection::Unsupported { .. })));
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_service_charge_checks_within_quota_are_free() {
        let mut account = account(AccountType::ServiceChargeChecking, Decimal::new(100, 0));

        for _ in 0..5 {
            account.write_check(Decimal::new(10, 0)).unwrap();
        }

        assert_eq!(account.balance(), Decimal::new(50, 0));
        assert_eq!(checks_written(&account), 5);
    }

    #[test]
    fn test_service_charge_checks_beyond_quota_pay_excess_fee() {
        let mut account = account(AccountType::ServiceChargeChecking, Decimal::new(100, 0));

        for _ in 0..7 {
            account.write_check(Decimal::new(10, 0)).unwrap();
        }

        // 7 checks of 10.00, two of them with the 5.00 excess fee
        assert_eq!(account.balance(), Decimal::new(20, 0));
        assert_eq!(checks_written(&account), 7);
    }

    #[test]
    fn test_no_service_charge_check_respects_minimum() {
        let mut account = account(AccountType::NoServiceChargeChecking, Decimal::new(1200, 0));

        assert!(account.write_check(Decimal::new(200, 0)).is_ok());
        assert!(account.write_check(Decimal::new(1, 0)).is_err());
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }

    #[rstest]
    #[case::savings(AccountType::Savings)]
    #[case::high_savings(AccountType::HighInterestSavings)]
    #[case::cd(AccountType::CertificateOfDeposit)]
    fn test_write_check_unsupported_outside_checking(#[case] account_type: AccountType) {
        let mut account = account(account_type, Decimal::new(5000, 0));

        let result = account.write_check(Decimal::new(10, 0));

        assert!(matches!(result, Err(Rejection::Unsupported { .. })));
        assert_eq!(account.balance(), Decimal::new(5000, 0));
    }

    #[rstest]
    #[case::service_charge_fee(AccountType::ServiceChargeChecking, Decimal::new(100, 0), Decimal::new(90, 0))]
    #[case::no_service_charge_none(AccountType::NoServiceChargeChecking, Decimal::new(1000, 0), Decimal::new(1000, 0))]
    #[case::high_checking_interest(AccountType::HighInterestChecking, Decimal::new(10000, 0), Decimal::new(10500, 0))]
    #[case::savings_zero_rate(AccountType::Savings, Decimal::new(1000, 0), Decimal::new(1000, 0))]
    #[case::high_savings_interest(AccountType::HighInterestSavings, Decimal::new(4000, 0), Decimal::new(4020, 0))]
    #[case::cd_interest(AccountType::CertificateOfDeposit, Decimal::new(1000, 0), Decimal::new(1050, 0))]
    fn test_monthly_statement(
        #[case] account_type: AccountType,
        #[case] balance: Decimal,
        #[case] expected: Decimal,
    ) {
        let mut account = account(account_type, balance);

        account.create_monthly_statement().unwrap();

        assert_eq!(account.balance(), expected);
    }

    #[test]
    fn test_monthly_statement_applies_once_per_call() {
        let mut account = Account::new(
            "Carol",
            1005,
            Decimal::new(1000, 0),
            AccountKind::savings(Decimal::new(1, 1)),
        );

        account.create_monthly_statement().unwrap();
        account.create_monthly_statement().unwrap();

        assert_eq!(account.balance(), Decimal::new(1210, 0));
    }

    #[test]
    fn test_service_charge_fee_can_take_balance_negative() {
        let mut account = account(AccountType::ServiceChargeChecking, Decimal::new(5, 0));

        account.create_monthly_statement().unwrap();

        assert_eq!(account.balance(), Decimal::new(-5, 0));
    }

    #[test]
    fn test_cd_statement_advances_term() {
        let mut account = Account::new(
            "Dan",
            1006,
            Decimal::new(1000, 0),
            AccountKind::certificate_of_deposit(Decimal::ZERO, 2),
        );

        account.create_monthly_statement().unwrap();
        account.create_monthly_statement().unwrap();
        assert!(account.withdraw_matured().is_err());

        account.create_monthly_statement().unwrap();
        assert_eq!(account.withdraw_matured(), Ok(Decimal::new(1000, 0)));
        assert_eq!(elapsed_months(&account), 3);
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut account = account(AccountType::Savings, Decimal::new(100, 0));

        let result = account.deposit(Decimal::MAX);

        assert_eq!(result, Err(Rejection::overflow(1000, "deposit")));
        assert_eq!(account.balance(), Decimal::new(100, 0));
    }

    #[test]
    fn test_withdraw_overflow_is_rejected() {
        let mut account = account(AccountType::Savings, Decimal::MIN);

        let result = account.withdraw(Decimal::new(1, 0));

        assert_eq!(result, Err(Rejection::overflow(1000, "withdraw")));
        assert_eq!(account.balance(), Decimal::MIN);
    }

    #[test]
    fn test_check_overflow_is_not_counted() {
        let mut account = account(AccountType::ServiceChargeChecking, Decimal::MIN);

        let result = account.write_check(Decimal::new(10, 0));

        assert_eq!(result, Err(Rejection::overflow(1000, "write_check")));
        assert_eq!(account.balance(), Decimal::MIN);
        assert_eq!(checks_written(&account), 0);
    }

    #[rstest]
    #[case::fee(AccountType::ServiceChargeChecking, Decimal::MIN)]
    #[case::interest(AccountType::HighInterestChecking, Decimal::MAX)]
    #[case::cd_interest(AccountType::CertificateOfDeposit, Decimal::MAX)]
    fn test_monthly_statement_overflow_is_rejected(
        #[case] account_type: AccountType,
        #[case] balance: Decimal,
    ) {
        let mut account = account(account_type, balance);

        let result = account.create_monthly_statement();

        assert_eq!(result, Err(Rejection::overflow(1000, "monthly_statement")));
        assert_eq!(account.balance(), balance);
        if account_type == AccountType::CertificateOfDeposit {
            assert_eq!(elapsed_months(&account), 0);
        }
    }
}
