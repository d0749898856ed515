//! # BankApp Core
//!
//! Core domain types for BankApp:
//!
//! - [`Account`] - balance holder with a Saving/Checking withdrawal policy
//! - [`Client`] - owns accounts and tracks the active one
//! - [`CoreError`] - domain errors shared by every layer

pub mod account;
pub mod client;
pub mod error;

pub use account::{saturating_sum, Account, AccountId, AccountType};
pub use client::{Client, Gender};
pub use error::{CoreError, CoreResult};
