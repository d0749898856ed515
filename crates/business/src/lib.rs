//! # BankApp Business
//!
//! Business logic layer - client repository, banking service and the
//! configuration used to seed it.

pub mod banking;
pub mod config;
pub mod error;
pub mod repository;

pub use banking::BankingService;
pub use config::{AccountSeed, BankConfig, ClientSeed, ConfigError};
pub use error::{BankingError, BankingResult};
pub use repository::{ClientRepository, MapClientRepository};
