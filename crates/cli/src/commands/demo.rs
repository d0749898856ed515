//! Demonstration flow over the seeded bank
//!
//! 1. Existing clients: implicit deposit with default-account recovery,
//!    withdrawal on overdraft, transfer between clients
//! 2. New client: accounts opened through the service and selected as active
//! 3. Bank-wide figures from the report service

use anyhow::{Context, Result};
use bankapp_business::{BankConfig, BankingService};
use bankapp_core::{AccountType, Client, CoreError, Gender};
use bankapp_reports::BankReportService;
use rust_decimal::Decimal;
use tracing::info;

pub const JONNY: &str = "Jonny Bravo";
pub const ADAM: &str = "Adam Budzinski";
pub const ANNA: &str = "Anna Smith";

/// Run the whole demonstration
pub fn run(config: &BankConfig) -> Result<()> {
    let mut bank = BankingService::from_config(config).context("Failed to seed the bank")?;

    work_with_existing_clients(&mut bank)?;
    banking_service_demo(&mut bank)?;
    bank_reports_demo(&bank);

    Ok(())
}

/// Deposit on the active account; on `ActiveAccountNotSet` pick the default
/// account once and retry.
pub fn deposit_resolving_default(client: &mut Client, amount: Decimal) -> Result<()> {
    match client.deposit(amount) {
        Err(CoreError::ActiveAccountNotSet(name)) => {
            println!("Active account not set for {}, using the first account", name);
            client.set_default_active_account_if_not_set();
            client
                .deposit(amount)
                .with_context(|| format!("Deposit retry failed for {}", client.name()))
        }
        other => other.with_context(|| format!("Deposit failed for {}", client.name())),
    }
}

pub fn work_with_existing_clients(bank: &mut BankingService) -> Result<()> {
    println!("\n=======================================");
    println!("\n===== Work with existing clients ======");

    let jonny = bank.get_client_mut(JONNY)?;
    deposit_resolving_default(jonny, Decimal::new(5_000, 0))?;
    println!("{}", jonny);

    let adam = bank.get_client_mut(ADAM)?;
    adam.set_default_active_account_if_not_set();
    adam.withdraw(Decimal::new(1_500, 0))
        .with_context(|| format!("Withdrawal failed for {}", ADAM))?;
    println!("\n{}, current balance: {}", adam.name(), adam.balance()?);

    bank.transfer_money(JONNY, ADAM, Decimal::new(1_000, 0))
        .context("Transfer failed")?;

    println!("\n=======================================");
    for client in bank.get_clients() {
        println!("{}", client);
    }
    Ok(())
}

pub fn banking_service_demo(bank: &mut BankingService) -> Result<()> {
    println!("\n=== Initialization using Banking implementation ===\n");

    bank.add_client(Client::new(ANNA, Gender::Female))?;

    for (account_type, amount) in [
        (AccountType::Saving, Decimal::new(1_000, 0)),
        (AccountType::Checking, Decimal::new(3_000, 0)),
    ] {
        let account = bank.create_account(ANNA, account_type)?;
        account.deposit(amount)?;
        let account_id = account.id();
        bank.update_account(ANNA, account_id)?;
    }

    for account in bank.get_all_accounts(ANNA)? {
        println!("{}", account);
    }
    Ok(())
}

pub fn bank_reports_demo(bank: &BankingService) {
    println!("\n=== Using BankReportService ===\n");

    let reports = BankReportService::new(bank.repository());
    println!("Number of clients: {}", reports.number_of_bank_clients());
    println!("Number of accounts: {}", reports.accounts_number());
    println!("Bank Credit Sum: {}", reports.bank_credit_sum());

    info!(
        clients = reports.number_of_bank_clients(),
        accounts = reports.accounts_number(),
        "Demo finished"
    );
}
