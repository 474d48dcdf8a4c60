use super::{Delivery, Gateway, Subscription};
use crate::core::{AccountData, AccountRecord, RecordId, SyncError, UserId, WriteError};
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};

// Global singleton instance of MemoryGateway
lazy_static! {
    static ref GLOBAL_GATEWAY: Arc<MemoryGateway> = Arc::new(MemoryGateway::new());
}

/// One user's collection plus its live subscribers.
#[derive(Default)]
struct Collection {
    /// Insertion order is the order groups see within a URL bucket.
    records: Vec<AccountRecord>,
    subscribers: Vec<mpsc::UnboundedSender<Delivery>>,
}

impl Collection {
    /// Push the full current collection to every live subscriber, pruning
    /// the ones that have hung up.
    fn push_snapshot(&mut self) {
        let snapshot = self.records.clone();
        self.subscribers
            .retain(|tx| tx.send(Delivery::Snapshot(snapshot.clone())).is_ok());
    }
}

/// In-process gateway: the hosted backend stand-in.
///
/// Keeps per-user collections, assigns UUID identities, and fans a fresh
/// full snapshot out to every subscriber of a collection after each write.
/// A remote backend would implement [`Gateway`] the same way over the wire.
pub struct MemoryGateway {
    collections: RwLock<HashMap<UserId, Collection>>,
}

impl MemoryGateway {
    /// Get the global MemoryGateway instance shared across all clients, so
    /// every client of one user observes the same collection.
    pub fn global() -> &'static Arc<MemoryGateway> {
        &GLOBAL_GATEWAY
    }

    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Required-field validation applied before any write reaches storage.
    fn validate(data: &AccountData) -> Result<(), WriteError> {
        if data.username.is_empty() {
            return Err(WriteError::Invalid("username must not be empty".into()));
        }
        if data.password.is_empty() {
            return Err(WriteError::Invalid("password must not be empty".into()));
        }
        Ok(())
    }

    /// Revoke a user's access: drop the collection's subscribers with an
    /// interruption notice. Consumers keep whatever snapshot they last saw.
    pub async fn revoke(&self, user: &UserId) {
        let mut collections = self.collections.write().await;
        if let Some(collection) = collections.get_mut(user) {
            warn!("Revoking subscription access for user {user}");
            let error = SyncError::PermissionRevoked(user.to_string());
            for tx in collection.subscribers.drain(..) {
                let _ = tx.send(Delivery::Interrupted(error.clone()));
            }
        }
    }

    /// Number of records currently stored for a user.
    pub async fn record_count(&self, user: &UserId) -> usize {
        let collections = self.collections.read().await;
        collections.get(user).map_or(0, |c| c.records.len())
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn create(&self, user: &UserId, data: AccountData) -> Result<RecordId, WriteError> {
        Self::validate(&data)?;

        let mut collections = self.collections.write().await;
        let collection = collections.entry(user.clone()).or_default();

        let id = RecordId::generate();
        debug!("create record {id} for user {user}");
        collection.records.push(AccountRecord::new(id.clone(), data));
        collection.push_snapshot();

        Ok(id)
    }

    async fn update(
        &self,
        user: &UserId,
        id: &RecordId,
        data: AccountData,
    ) -> Result<(), WriteError> {
        Self::validate(&data)?;

        let mut collections = self.collections.write().await;
        let collection = collections
            .get_mut(user)
            .ok_or_else(|| WriteError::UnknownRecord(id.to_string()))?;

        // Whole-record overwrite, position preserved.
        let record = collection
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| WriteError::UnknownRecord(id.to_string()))?;

        debug!("update record {id} for user {user}");
        record.data = data;
        collection.push_snapshot();

        Ok(())
    }

    async fn delete(&self, user: &UserId, id: &RecordId) -> Result<(), WriteError> {
        let mut collections = self.collections.write().await;
        let collection = collections
            .get_mut(user)
            .ok_or_else(|| WriteError::UnknownRecord(id.to_string()))?;

        let before = collection.records.len();
        collection.records.retain(|r| &r.id != id);
        if collection.records.len() == before {
            return Err(WriteError::UnknownRecord(id.to_string()));
        }

        debug!("delete record {id} for user {user}");
        collection.push_snapshot();

        Ok(())
    }

    async fn subscribe(&self, user: &UserId) -> Result<Subscription, SyncError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(user.clone()).or_default();

        let (tx, rx) = mpsc::unbounded_channel();

        // The first delivery is the collection as it stands right now.
        tx.send(Delivery::Snapshot(collection.records.clone()))
            .map_err(|_| SyncError::Interrupted("subscriber closed".into()))?;
        collection.subscribers.push(tx);

        debug!(
            "user {user} subscribed ({} records resident)",
            collection.records.len()
        );

        Ok(Subscription::new(rx))
    }
}
