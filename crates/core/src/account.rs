//! # Account Module
//!
//! Defines Account - a single balance holder owned by exactly one Client.
//! Saving and Checking accounts share one type; they differ only in the
//! overdraft limit that governs withdrawals.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Account ID counter, unique for the lifetime of the process
static ACCOUNT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Add up amounts, clamping to `Decimal::MAX` / `Decimal::MIN` instead of
/// overflowing
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

/// Identifier of an account (ACC_000001, ACC_000002, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Generate the next process-unique ID
    pub fn next() -> Self {
        Self(ACCOUNT_COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACC_{:06}", self.0)
    }
}

/// Account variant.
///
/// - Saving: balance may never drop below zero
/// - Checking: balance may go negative down to the overdraft limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Saving,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Saving => "saving",
            AccountType::Checking => "checking",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "saving" => Some(AccountType::Saving),
            "checking" => Some(AccountType::Checking),
            _ => None,
        }
    }

    /// Whether this variant may carry an overdraft limit
    pub fn allows_overdraft(&self) -> bool {
        matches!(self, AccountType::Checking)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client's account.
///
/// Invariant: `balance >= -overdraft_limit` after every operation. Fields are
/// private so the invariant can only change through `deposit`/`withdraw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    account_type: AccountType,
    balance: Decimal,
    overdraft_limit: Decimal,
}

impl Account {
    /// Create an account with an initial balance and overdraft limit.
    ///
    /// Fails with `InvalidAmount` when the overdraft limit is negative, when a
    /// Saving account is given a non-zero limit, or when the initial balance
    /// is already below the overdraft floor.
    pub fn new(
        account_type: AccountType,
        balance: Decimal,
        overdraft_limit: Decimal,
    ) -> CoreResult<Self> {
        if overdraft_limit < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "Overdraft limit must not be negative: {}",
                overdraft_limit
            )));
        }
        if !account_type.allows_overdraft() && !overdraft_limit.is_zero() {
            return Err(CoreError::InvalidAmount(format!(
                "{} account cannot have an overdraft limit: {}",
                account_type, overdraft_limit
            )));
        }
        if balance < -overdraft_limit {
            return Err(CoreError::InvalidAmount(format!(
                "Initial balance {} is below the overdraft floor -{}",
                balance, overdraft_limit
            )));
        }

        Ok(Self {
            id: AccountId::next(),
            account_type,
            balance,
            overdraft_limit,
        })
    }

    /// Saving account with an initial balance
    pub fn saving(balance: Decimal) -> CoreResult<Self> {
        Self::new(AccountType::Saving, balance, Decimal::ZERO)
    }

    /// Checking account with an initial balance and overdraft limit
    pub fn checking(balance: Decimal, overdraft_limit: Decimal) -> CoreResult<Self> {
        Self::new(AccountType::Checking, balance, overdraft_limit)
    }

    /// Zero-balance account of the given type.
    ///
    /// `checking_overdraft` applies to Checking accounts only.
    pub fn open(account_type: AccountType, checking_overdraft: Decimal) -> CoreResult<Self> {
        let overdraft_limit = if account_type.allows_overdraft() {
            checking_overdraft
        } else {
            Decimal::ZERO
        };
        Self::new(account_type, Decimal::ZERO, overdraft_limit)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    /// Balance plus overdraft headroom
    pub fn available_funds(&self) -> Decimal {
        self.balance
            .checked_add(self.overdraft_limit)
            .unwrap_or(Decimal::MAX)
    }

    /// Largest amount a single withdrawal may take right now
    pub fn maximum_amount_to_withdraw(&self) -> Decimal {
        self.available_funds().max(Decimal::ZERO)
    }

    /// Add funds to the account
    pub fn deposit(&mut self, amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::non_positive("Deposit", amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(CoreError::BalanceOverflow {
                account_id: self.id,
                amount,
            })?;
        Ok(())
    }

    /// Take funds from the account, honouring the overdraft floor
    pub fn withdraw(&mut self, amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::non_positive("Withdrawal", amount));
        }

        let insufficient = || CoreError::InsufficientFunds {
            account_id: self.id,
            requested: amount,
            available: self.maximum_amount_to_withdraw(),
        };

        let remaining = self.balance.checked_sub(amount).ok_or_else(insufficient)?;
        if remaining < -self.overdraft_limit {
            return Err(insufficient());
        }

        self.balance = remaining;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overdraft_limit.is_zero() {
            write!(
                f,
                "{} account {} (balance: {})",
                self.account_type, self.id, self.balance
            )
        } else {
            write!(
                f,
                "{} account {} (balance: {}, overdraft: {})",
                self.account_type, self.id, self.balance, self.overdraft_limit
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_type_str() {
        assert_eq!(AccountType::Saving.as_str(), "saving");
        assert_eq!(AccountType::from_str("CHECKING"), Some(AccountType::Checking));
        assert_eq!(AccountType::from_str("credit"), None);
        assert!(AccountType::Checking.allows_overdraft());
        assert!(!AccountType::Saving.allows_overdraft());
    }

    #[test]
    fn test_account_ids_are_unique() {
        let a = Account::saving(dec!(0)).unwrap();
        let b = Account::saving(dec!(0)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(AccountId::new(42).to_string(), "ACC_000042");
    }

    #[test]
    fn test_constructor_validation() {
        assert!(Account::checking(dec!(0), dec!(-1)).is_err());
        assert!(Account::new(AccountType::Saving, dec!(0), dec!(100)).is_err());
        assert!(Account::saving(dec!(-1)).is_err());
        assert!(Account::checking(dec!(-500), dec!(500)).is_ok());
        assert!(Account::checking(dec!(-501), dec!(500)).is_err());
    }

    #[test]
    fn test_open_ignores_overdraft_for_saving() {
        let saving = Account::open(AccountType::Saving, dec!(1500)).unwrap();
        assert_eq!(saving.balance(), dec!(0));
        assert_eq!(saving.overdraft_limit(), dec!(0));

        let checking = Account::open(AccountType::Checking, dec!(1500)).unwrap();
        assert_eq!(checking.overdraft_limit(), dec!(1500));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = Account::saving(dec!(100)).unwrap();
        assert!(account.deposit(dec!(0)).unwrap_err().is_invalid_amount());
        assert!(account.deposit(dec!(-10)).unwrap_err().is_invalid_amount());
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut account = Account::saving(Decimal::MAX).unwrap();
        let err = account.deposit(dec!(1)).unwrap_err();
        assert!(matches!(err, CoreError::BalanceOverflow { .. }));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_saving_withdraw_insufficient() {
        let mut account = Account::saving(dec!(1000)).unwrap();
        let err = account.withdraw(dec!(1500)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(account.balance(), dec!(1000));
    }

    #[test]
    fn test_checking_overdraft_floor() {
        let mut account = Account::checking(dec!(0), dec!(1500)).unwrap();
        account.withdraw(dec!(1500)).unwrap();
        assert_eq!(account.balance(), dec!(-1500));
        assert_eq!(account.maximum_amount_to_withdraw(), dec!(0));

        let err = account.withdraw(dec!(1)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(account.balance(), dec!(-1500));
    }

    #[test]
    fn test_deposit_withdraw_round_trip() {
        let mut account = Account::checking(dec!(250.75), dec!(100)).unwrap();
        let before = account.balance();
        account.deposit(dec!(99.25)).unwrap();
        account.withdraw(dec!(99.25)).unwrap();
        assert_eq!(account.balance(), before);
    }

    #[test]
    fn test_invariant_holds_across_operations() {
        let mut account = Account::checking(dec!(10), dec!(50)).unwrap();
        for amount in [dec!(30), dec!(25), dec!(10), dec!(5), dec!(1)] {
            let _ = account.withdraw(amount);
            assert!(account.balance() >= -account.overdraft_limit());
        }
        assert_eq!(account.balance(), dec!(-50));
    }

    #[test]
    fn test_saturating_sum_clamps() {
        assert_eq!(saturating_sum([dec!(1.5), dec!(-0.5), dec!(2)]), dec!(3));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_account_display() {
        let account = Account::saving(dec!(1000)).unwrap();
        let text = account.to_string();
        assert!(text.starts_with("saving account ACC_"));
        assert!(text.ends_with("(balance: 1000)"));
    }

    #[test]
    fn test_account_serializes_balance_as_string() {
        let account = Account::checking(dec!(12.50), dec!(100)).unwrap();
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["account_type"], "checking");
        assert_eq!(json["balance"], "12.50");
        assert_eq!(json["overdraft_limit"], "100");
    }
}
