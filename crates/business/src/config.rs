//! Bank configuration
//!
//! Plain struct describing the service policy and the clients to seed it
//! with. Loaded from JSON; missing fields fall back to serde defaults.

use bankapp_core::{Account, AccountType, Client, CoreResult, Gender};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors while loading a [`BankConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the [`BankingService`](crate::BankingService)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Overdraft limit given to checking accounts opened by the service
    #[serde(default = "default_overdraft_limit")]
    pub default_overdraft_limit: Decimal,

    /// Clients registered at start-up
    #[serde(default)]
    pub clients: Vec<ClientSeed>,
}

/// Initial state of one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSeed {
    pub name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
}

/// Initial state of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSeed {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: Decimal,
    /// Checking accounts without a limit use `default_overdraft_limit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<Decimal>,
}

fn default_overdraft_limit() -> Decimal {
    Decimal::new(1_500, 0)
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            default_overdraft_limit: default_overdraft_limit(),
            clients: vec![
                ClientSeed::new("Jonny Bravo", Gender::Male)
                    .with_account(AccountSeed::saving(Decimal::new(1_000, 0)))
                    .with_account(AccountSeed::checking(Decimal::new(1_000, 0))),
                ClientSeed::new("Adam Budzinski", Gender::Male)
                    .with_account(AccountSeed::checking(Decimal::new(1_500, 0))),
            ],
        }
    }
}

impl BankConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configuration with the default policy and no clients
    pub fn empty() -> Self {
        Self {
            default_overdraft_limit: default_overdraft_limit(),
            clients: Vec::new(),
        }
    }
}

impl ClientSeed {
    pub fn new(name: &str, gender: Gender) -> Self {
        Self {
            name: name.to_string(),
            gender,
            city: None,
            accounts: Vec::new(),
        }
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn with_account(mut self, account: AccountSeed) -> Self {
        self.accounts.push(account);
        self
    }

    /// Build the client with its accounts; no account is made active
    pub fn build(&self, default_overdraft: Decimal) -> CoreResult<Client> {
        let mut client = Client::new(self.name.clone(), self.gender);
        if let Some(city) = &self.city {
            client = client.with_city(city.clone());
        }
        for seed in &self.accounts {
            client.add_account(seed.build(default_overdraft)?);
        }
        Ok(client)
    }
}

impl AccountSeed {
    pub fn saving(balance: Decimal) -> Self {
        Self {
            account_type: AccountType::Saving,
            balance,
            overdraft_limit: None,
        }
    }

    pub fn checking(balance: Decimal) -> Self {
        Self {
            account_type: AccountType::Checking,
            balance,
            overdraft_limit: None,
        }
    }

    pub fn with_overdraft_limit(mut self, limit: Decimal) -> Self {
        self.overdraft_limit = Some(limit);
        self
    }

    pub fn build(&self, default_overdraft: Decimal) -> CoreResult<Account> {
        let overdraft = match self.account_type {
            AccountType::Checking => self.overdraft_limit.unwrap_or(default_overdraft),
            AccountType::Saving => self.overdraft_limit.unwrap_or(Decimal::ZERO),
        };
        Account::new(self.account_type, self.balance, overdraft)
    }
}
