//! Banking service
//!
//! Registers clients, opens accounts, selects active accounts and moves
//! money between two clients' active accounts.

use crate::config::BankConfig;
use crate::error::{BankingError, BankingResult};
use crate::repository::{ClientRepository, MapClientRepository};
use bankapp_core::{Account, AccountId, AccountType, Client, CoreError};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// Banking Service - registers clients and accounts and moves money
/// between clients
pub struct BankingService<R: ClientRepository = MapClientRepository> {
    repository: R,
    default_overdraft: Decimal,
}

impl BankingService<MapClientRepository> {
    /// Build a service over an in-memory repository seeded from `config`
    pub fn from_config(config: &BankConfig) -> BankingResult<Self> {
        let mut service = Self::new(MapClientRepository::new())
            .with_default_overdraft(config.default_overdraft_limit);

        for seed in &config.clients {
            let client = seed.build(config.default_overdraft_limit)?;
            service.add_client(client)?;
        }

        Ok(service)
    }
}

impl<R: ClientRepository> BankingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            default_overdraft: Decimal::ZERO,
        }
    }

    /// Overdraft limit for checking accounts opened via [`Self::create_account`]
    pub fn with_default_overdraft(mut self, limit: Decimal) -> Self {
        self.default_overdraft = limit;
        self
    }

    pub fn default_overdraft(&self) -> Decimal {
        self.default_overdraft
    }

    /// Read-only view of the storage, for reporting
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Register a client. Fails with `DuplicateClient` when the name is taken.
    pub fn add_client(&mut self, client: Client) -> BankingResult<&Client> {
        let stored = self.repository.add(client).inspect_err(|err| {
            warn!(error = %err, "Client registration rejected");
        })?;
        info!(
            client = stored.name(),
            accounts = stored.accounts().len(),
            "Client registered"
        );
        Ok(&*stored)
    }

    pub fn get_client(&self, name: &str) -> BankingResult<&Client> {
        self.repository.get(name)
    }

    pub fn get_client_mut(&mut self, name: &str) -> BankingResult<&mut Client> {
        self.repository.get_mut(name)
    }

    pub fn get_clients(&self) -> Vec<&Client> {
        self.repository.all()
    }

    /// Open a zero-balance account for `client`.
    ///
    /// The account is attached but not made active.
    pub fn create_account(
        &mut self,
        client: &str,
        account_type: AccountType,
    ) -> BankingResult<&mut Account> {
        let account = Account::open(account_type, self.default_overdraft)?;
        let owner = self.repository.get_mut(client)?;
        let account = owner.add_account(account);
        info!(
            client,
            account = %account.id(),
            account_type = %account_type,
            "Account created"
        );
        Ok(account)
    }

    /// Make `account_id` the client's active account.
    ///
    /// Idempotent: re-selecting the active account changes nothing and never
    /// reorders the client's accounts.
    pub fn update_account(&mut self, client: &str, account_id: AccountId) -> BankingResult<()> {
        let owner = self.repository.get_mut(client)?;
        if owner.active_account().map(Account::id) == Some(account_id) {
            debug!(client, account = %account_id, "Account already active");
            return Ok(());
        }
        owner.set_active_account(account_id)?;
        info!(client, account = %account_id, "Active account updated");
        Ok(())
    }

    pub fn get_all_accounts(&self, client: &str) -> BankingResult<&[Account]> {
        Ok(self.repository.get(client)?.accounts())
    }

    /// Move `amount` from the source's active account to the destination's.
    ///
    /// Either both balances change or neither does: the withdrawal is checked
    /// first, and a failed deposit rolls the withdrawal back.
    pub fn transfer_money(
        &mut self,
        source: &str,
        destination: &str,
        amount: Decimal,
    ) -> BankingResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::non_positive("Transfer", amount).into());
        }

        for name in [source, destination] {
            if !self.repository.get(name)?.has_active_account() {
                warn!(client = name, "Transfer rejected: no active account");
                return Err(CoreError::ActiveAccountNotSet(name.to_string()).into());
            }
        }

        self.repository
            .get_mut(source)?
            .withdraw(amount)
            .inspect_err(|err| {
                warn!(source, destination, %amount, error = %err, "Transfer rejected");
            })?;

        let deposited = self
            .repository
            .get_mut(destination)
            .and_then(|client| client.deposit(amount).map_err(BankingError::from));

        if let Err(err) = deposited {
            self.rollback_withdrawal(source, amount);
            warn!(source, destination, %amount, error = %err, "Transfer rolled back");
            return Err(err);
        }

        info!(source, destination, %amount, "Money transferred");
        Ok(())
    }

    /// Return a withdrawn amount to the source after a failed deposit
    fn rollback_withdrawal(&mut self, source: &str, amount: Decimal) {
        let restored = self
            .repository
            .get_mut(source)
            .and_then(|client| client.deposit(amount).map_err(BankingError::from));

        if let Err(err) = restored {
            error!(source, %amount, error = %err, "Failed to roll back withdrawal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankapp_core::Gender;
    use rust_decimal_macros::dec;

    fn service() -> BankingService {
        BankingService::new(MapClientRepository::new()).with_default_overdraft(dec!(1500))
    }

    fn client_with(name: &str, account: Account) -> Client {
        let mut client = Client::new(name, Gender::Male);
        client.add_account(account);
        client.set_default_active_account_if_not_set();
        client
    }

    fn active_balance(service: &BankingService, name: &str) -> Decimal {
        service.get_client(name).unwrap().balance().unwrap()
    }

    #[test]
    fn test_add_client_duplicate() {
        let mut bank = service();
        bank.add_client(Client::new("Anna Smith", Gender::Female)).unwrap();

        let err = bank
            .add_client(Client::new("Anna Smith", Gender::Female))
            .unwrap_err();
        assert!(err.is_duplicate_client());
        assert_eq!(bank.get_clients().len(), 1);
    }

    #[test]
    fn test_get_client_missing() {
        let bank = service();
        assert!(bank.get_client("Ghost").unwrap_err().is_client_not_found());
        assert!(bank.get_all_accounts("Ghost").unwrap_err().is_client_not_found());
    }

    #[test]
    fn test_create_account_not_active() {
        let mut bank = service();
        bank.add_client(Client::new("Anna Smith", Gender::Female)).unwrap();

        let checking = bank.create_account("Anna Smith", AccountType::Checking).unwrap();
        assert_eq!(checking.balance(), dec!(0));
        assert_eq!(checking.overdraft_limit(), dec!(1500));

        let saving = bank.create_account("Anna Smith", AccountType::Saving).unwrap();
        assert_eq!(saving.overdraft_limit(), dec!(0));

        let anna = bank.get_client("Anna Smith").unwrap();
        assert_eq!(anna.accounts().len(), 2);
        assert!(!anna.has_active_account());
    }

    #[test]
    fn test_create_account_unknown_client() {
        let mut bank = service();
        let err = bank.create_account("Ghost", AccountType::Saving).unwrap_err();
        assert!(err.is_client_not_found());
    }

    #[test]
    fn test_update_account_marks_active() {
        let mut bank = service();
        bank.add_client(Client::new("Anna Smith", Gender::Female)).unwrap();

        let saving = bank.create_account("Anna Smith", AccountType::Saving).unwrap();
        saving.deposit(dec!(1000)).unwrap();
        let saving_id = saving.id();
        bank.update_account("Anna Smith", saving_id).unwrap();

        let checking = bank.create_account("Anna Smith", AccountType::Checking).unwrap();
        checking.deposit(dec!(3000)).unwrap();
        let checking_id = checking.id();
        bank.update_account("Anna Smith", checking_id).unwrap();
        bank.update_account("Anna Smith", checking_id).unwrap();

        let accounts = bank.get_all_accounts("Anna Smith").unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id(), saving_id);
        assert_eq!(accounts[1].id(), checking_id);
        assert_eq!(active_balance(&bank, "Anna Smith"), dec!(3000));
    }

    #[test]
    fn test_update_account_foreign_account() {
        let mut bank = service();
        bank.add_client(Client::new("Anna Smith", Gender::Female)).unwrap();
        let foreign = Account::saving(dec!(0)).unwrap();

        let err = bank.update_account("Anna Smith", foreign.id()).unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(6000)).unwrap()))
            .unwrap();
        bank.add_client(client_with("Adam", Account::checking(dec!(0), dec!(1500)).unwrap()))
            .unwrap();

        bank.transfer_money("Jonny", "Adam", dec!(1000)).unwrap();

        assert_eq!(active_balance(&bank, "Jonny"), dec!(5000));
        assert_eq!(active_balance(&bank, "Adam"), dec!(1000));
    }

    #[test]
    fn test_transfer_insufficient_funds_is_atomic() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(100)).unwrap()))
            .unwrap();
        bank.add_client(client_with("Adam", Account::saving(dec!(50)).unwrap()))
            .unwrap();

        let err = bank.transfer_money("Jonny", "Adam", dec!(101)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));
        assert_eq!(active_balance(&bank, "Adam"), dec!(50));
    }

    #[test]
    fn test_transfer_deposit_overflow_rolls_back() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(100)).unwrap()))
            .unwrap();
        bank.add_client(client_with("Rich", Account::saving(Decimal::MAX).unwrap()))
            .unwrap();

        let err = bank.transfer_money("Jonny", "Rich", dec!(10)).unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::BalanceOverflow { .. })
        ));
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));
        assert_eq!(active_balance(&bank, "Rich"), Decimal::MAX);
    }

    #[test]
    fn test_transfer_requires_active_accounts() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(100)).unwrap()))
            .unwrap();
        let mut adam = Client::new("Adam", Gender::Male);
        adam.add_account(Account::saving(dec!(0)).unwrap());
        bank.add_client(adam).unwrap();

        let err = bank.transfer_money("Jonny", "Adam", dec!(10)).unwrap_err();
        assert_eq!(
            err,
            BankingError::Core(CoreError::ActiveAccountNotSet("Adam".to_string()))
        );
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));

        let err = bank.transfer_money("Adam", "Jonny", dec!(10)).unwrap_err();
        assert_eq!(
            err,
            BankingError::Core(CoreError::ActiveAccountNotSet("Adam".to_string()))
        );
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));
        assert_eq!(bank.get_client("Adam").unwrap().accounts()[0].balance(), dec!(0));
    }

    #[test]
    fn test_transfer_invalid_amount_and_unknown_client() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(100)).unwrap()))
            .unwrap();

        let err = bank.transfer_money("Jonny", "Jonny", dec!(0)).unwrap_err();
        assert!(err.as_core().is_some_and(CoreError::is_invalid_amount));

        let err = bank.transfer_money("Jonny", "Ghost", dec!(10)).unwrap_err();
        assert!(err.is_client_not_found());
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));
    }

    #[test]
    fn test_transfer_to_self_is_net_noop() {
        let mut bank = service();
        bank.add_client(client_with("Jonny", Account::saving(dec!(100)).unwrap()))
            .unwrap();

        bank.transfer_money("Jonny", "Jonny", dec!(60)).unwrap();
        assert_eq!(active_balance(&bank, "Jonny"), dec!(100));

        let err = bank.transfer_money("Jonny", "Jonny", dec!(160)).unwrap_err();
        assert!(err.is_insufficient_funds());
    }

    #[test]
    fn test_from_config_seeds_clients() {
        let bank = BankingService::from_config(&BankConfig::default()).unwrap();

        let names: Vec<&str> = bank.get_clients().into_iter().map(Client::name).collect();
        assert_eq!(names, vec!["Adam Budzinski", "Jonny Bravo"]);
        assert_eq!(bank.default_overdraft(), dec!(1500));
        assert!(!bank.get_client("Jonny Bravo").unwrap().has_active_account());
    }
}
