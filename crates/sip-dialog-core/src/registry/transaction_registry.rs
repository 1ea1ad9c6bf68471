use std::sync::Arc;

use dashmap::DashMap;

use crate::error::TransactionError;
use crate::transaction::{ClientTransaction, ServerTransaction, TransactionKey};

/// Indexes live transactions by key, plus a branch-only auxiliary index so
/// an inbound CANCEL (which only carries the branch it shares with the
/// INVITE it targets) can find the server transaction without the caller
/// needing to already know that transaction's full key.
#[derive(Default)]
pub struct TransactionRegistry {
    clients: DashMap<TransactionKey, Arc<dyn ClientTransaction>>,
    servers: DashMap<TransactionKey, Arc<dyn ServerTransaction>>,
    branch_index: DashMap<String, TransactionKey>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        TransactionRegistry::default()
    }

    pub fn insert_client(&self, handle: Arc<dyn ClientTransaction>) -> Result<(), TransactionError> {
        let key = handle.key().clone();
        if self.clients.contains_key(&key) {
            return Err(TransactionError::AlreadyStarted);
        }
        self.branch_index.insert(key.branch.clone(), key.clone());
        self.clients.insert(key, handle);
        Ok(())
    }

    pub fn insert_server(&self, handle: Arc<dyn ServerTransaction>) -> Result<(), TransactionError> {
        let key = handle.key().clone();
        if self.servers.contains_key(&key) {
            return Err(TransactionError::AlreadyStarted);
        }
        self.branch_index.insert(key.branch.clone(), key.clone());
        self.servers.insert(key, handle);
        Ok(())
    }

    pub fn client(&self, key: &TransactionKey) -> Option<Arc<dyn ClientTransaction>> {
        self.clients.get(key).map(|entry| entry.value().clone())
    }

    pub fn server(&self, key: &TransactionKey) -> Option<Arc<dyn ServerTransaction>> {
        self.servers.get(key).map(|entry| entry.value().clone())
    }

    /// Resolves a bare branch to whichever transaction last registered it,
    /// used for CANCEL routing (spec.md §4.3.6).
    pub fn find_by_branch(&self, branch: &str) -> Option<TransactionKey> {
        self.branch_index.get(branch).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, key: &TransactionKey) {
        self.clients.remove(key);
        self.servers.remove(key);
        if self.branch_index.get(&key.branch).map(|entry| entry.value() == key).unwrap_or(false) {
            self.branch_index.remove(&key.branch);
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len() + self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
