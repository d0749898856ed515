//! Client storage
//!
//! Key-value store of clients keyed by name. Names are unique.

use crate::error::{BankingError, BankingResult};
use bankapp_core::Client;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Storage seam for [`BankingService`](crate::BankingService)
pub trait ClientRepository {
    /// Store a client under its name. Fails with `DuplicateClient` when the
    /// name is taken.
    fn add(&mut self, client: Client) -> BankingResult<&mut Client>;

    fn get(&self, name: &str) -> BankingResult<&Client>;

    fn get_mut(&mut self, name: &str) -> BankingResult<&mut Client>;

    /// Every stored client, in the repository's enumeration order
    fn all(&self) -> Vec<&Client>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }
}

/// In-memory repository; enumerates clients in ascending name order
#[derive(Debug, Default)]
pub struct MapClientRepository {
    clients: BTreeMap<String, Client>,
}

impl MapClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientRepository for MapClientRepository {
    fn add(&mut self, client: Client) -> BankingResult<&mut Client> {
        match self.clients.entry(client.name().to_string()) {
            Entry::Occupied(entry) => Err(BankingError::DuplicateClient(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(client)),
        }
    }

    fn get(&self, name: &str) -> BankingResult<&Client> {
        self.clients
            .get(name)
            .ok_or_else(|| BankingError::ClientNotFound(name.to_string()))
    }

    fn get_mut(&mut self, name: &str) -> BankingResult<&mut Client> {
        self.clients
            .get_mut(name)
            .ok_or_else(|| BankingError::ClientNotFound(name.to_string()))
    }

    fn all(&self) -> Vec<&Client> {
        self.clients.values().collect()
    }

    fn len(&self) -> usize {
        self.clients.len()
    }
}
