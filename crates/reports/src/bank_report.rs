//! Bank-wide read-only aggregates
//!
//! [`BankReportService`] folds over the client repository without mutating
//! it; [`BankSummaryReport`] packages the figures for the exporters.

use crate::exporters::ReportData;
use bankapp_business::ClientRepository;
use bankapp_core::{saturating_sum, AccountId, AccountType, Client};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Report service over a borrowed repository
pub struct BankReportService<'a, R: ClientRepository> {
    repository: &'a R,
}

impl<'a, R: ClientRepository> BankReportService<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn number_of_bank_clients(&self) -> usize {
        self.repository.len()
    }

    /// Number of accounts across all clients
    pub fn accounts_number(&self) -> usize {
        self.repository
            .all()
            .iter()
            .map(|client| client.accounts().len())
            .sum()
    }

    /// Sum of every account balance, saturating at the decimal range
    pub fn bank_credit_sum(&self) -> Decimal {
        saturating_sum(
            self.repository
                .all()
                .iter()
                .flat_map(|client| client.accounts())
                .map(|account| account.balance()),
        )
    }

    /// Client names grouped by city; clients without a city are skipped
    pub fn clients_by_city(&self) -> BTreeMap<String, Vec<String>> {
        let mut cities: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for client in self.repository.all() {
            if let Some(city) = client.city() {
                cities
                    .entry(city.to_string())
                    .or_default()
                    .push(client.name().to_string());
            }
        }
        cities
    }

    /// Snapshot of every account plus the bank-wide figures
    pub fn summary(&self, title: &str) -> BankSummaryReport {
        let mut report = BankSummaryReport::new(title);
        for client in self.repository.all() {
            report.add_client(client);
        }
        report.number_of_clients = self.number_of_bank_clients();
        report.credit_sum = self.bank_credit_sum();
        report
    }
}

/// One account line of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct AccountLine {
    pub client: String,
    pub account_id: AccountId,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub overdraft_limit: Decimal,
    pub active: bool,
}

/// Bank summary report data
#[derive(Debug, Clone)]
pub struct BankSummaryReport {
    pub title: String,
    pub accounts: Vec<AccountLine>,
    pub number_of_clients: usize,
    pub credit_sum: Decimal,
    pub generated_at: DateTime<Utc>,
}

impl BankSummaryReport {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            accounts: Vec::new(),
            number_of_clients: 0,
            credit_sum: Decimal::ZERO,
            generated_at: Utc::now(),
        }
    }

    /// Append one line per account of `client`
    pub fn add_client(&mut self, client: &Client) {
        let active = client.active_account().map(|a| a.id());
        self.accounts
            .extend(client.accounts().iter().map(|account| AccountLine {
                client: client.name().to_string(),
                account_id: account.id(),
                account_type: account.account_type(),
                balance: account.balance(),
                overdraft_limit: account.overdraft_limit(),
                active: active == Some(account.id()),
            }));
    }
}

impl ReportData for BankSummaryReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        ["Client", "Account", "Type", "Balance", "Overdraft", "Active"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.accounts
            .iter()
            .map(|line| {
                vec![
                    line.client.clone(),
                    line.account_id.to_string(),
                    line.account_type.to_string(),
                    line.balance.to_string(),
                    line.overdraft_limit.to_string(),
                    if line.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Number of clients".to_string(), self.number_of_clients.to_string()),
            ("Number of accounts".to_string(), self.accounts.len().to_string()),
            ("Bank credit sum".to_string(), self.credit_sum.to_string()),
            ("Generated At".to_string(), self.generated_at.to_rfc3339()),
        ]
    }
}
