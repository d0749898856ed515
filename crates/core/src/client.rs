//! # Client Module
//!
//! Defines Gender and Client. A Client owns its accounts and keeps an
//! optional "active account" used by the implicit deposit/withdraw/balance
//! operations.

use crate::account::{saturating_sum, Account, AccountId};
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client gender, used for the salutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn salutation(&self) -> &'static str {
        match self {
            Gender::Male => "Mr.",
            Gender::Female => "Ms.",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank client.
///
/// Accounts keep their insertion order. The active account is an index into
/// `accounts`; it is only set by [`Client::set_default_active_account_if_not_set`]
/// or [`Client::set_active_account`], never by [`Client::add_account`].
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    name: String,
    gender: Gender,
    city: Option<String>,
    accounts: Vec<Account>,
    active_account: Option<usize>,
}

impl Client {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            city: None,
            accounts: Vec::new(),
            active_account: None,
        }
    }

    /// Set the client's city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id() == id)
    }

    /// Append an account. The active account is left untouched.
    pub fn add_account(&mut self, account: Account) -> &mut Account {
        self.accounts.push(account);
        let last = self.accounts.len() - 1;
        &mut self.accounts[last]
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.active_account.map(|index| &self.accounts[index])
    }

    pub fn has_active_account(&self) -> bool {
        self.active_account.is_some()
    }

    /// Pick the first account as active when none is chosen yet.
    ///
    /// No-op when an active account is already set or the client has no
    /// accounts.
    pub fn set_default_active_account_if_not_set(&mut self) {
        if self.active_account.is_none() && !self.accounts.is_empty() {
            self.active_account = Some(0);
        }
    }

    /// Make the owned account `id` the active account
    pub fn set_active_account(&mut self, id: AccountId) -> CoreResult<()> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| CoreError::AccountNotFound {
                client: self.name.clone(),
                account_id: id,
            })?;
        self.active_account = Some(index);
        Ok(())
    }

    /// Mutable access to the active account
    pub fn active_account_mut(&mut self) -> CoreResult<&mut Account> {
        match self.active_account {
            Some(index) => Ok(&mut self.accounts[index]),
            None => Err(CoreError::ActiveAccountNotSet(self.name.clone())),
        }
    }

    /// Deposit into the active account
    pub fn deposit(&mut self, amount: Decimal) -> CoreResult<()> {
        self.active_account_mut()?.deposit(amount)
    }

    /// Withdraw from the active account
    pub fn withdraw(&mut self, amount: Decimal) -> CoreResult<()> {
        self.active_account_mut()?.withdraw(amount)
    }

    /// Balance of the active account
    pub fn balance(&self) -> CoreResult<Decimal> {
        self.active_account()
            .map(Account::balance)
            .ok_or_else(|| CoreError::ActiveAccountNotSet(self.name.clone()))
    }

    /// Sum of the balances of every account, saturating at the decimal range
    pub fn total_balance(&self) -> Decimal {
        saturating_sum(self.accounts.iter().map(Account::balance))
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gender.salutation(), self.name)?;
        if let Some(city) = &self.city {
            write!(f, " ({})", city)?;
        }
        match self.active_account() {
            Some(active) => write!(f, ", active account: {}", active.id())?,
            None => write!(f, ", active account: none")?,
        }
        for account in &self.accounts {
            write!(f, "\n  {}", account)?;
        }
        Ok(())
    }
}
