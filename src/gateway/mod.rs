//! Persistence gateway boundary.
//!
//! The gateway owns all durable state. The core never mutates its local
//! snapshot directly: every change flows through a write call here and comes
//! back as a full-collection push on the subscription.

pub mod memory;

use crate::core::{AccountData, AccountRecord, RecordId, SyncError, UserId, WriteError};
use async_trait::async_trait;
use tokio::sync::mpsc;

pub use memory::MemoryGateway;

/// One push from the gateway to a subscriber.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// The full current collection. Sent on subscribe and after every write.
    Snapshot(Vec<AccountRecord>),
    /// The subscription failed; no further snapshots will arrive.
    Interrupted(SyncError),
}

/// Live stream of collection snapshots for one user.
///
/// Deliveries arrive in the order the gateway produced them; the first is
/// always the collection as it stood at subscribe time.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Delivery>) -> Self {
        Self { rx }
    }

    /// Next delivery, or `None` once the gateway has dropped this subscriber.
    pub async fn next(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }
}

/// Hosted-backend contract consumed by the core.
///
/// Identity uniqueness and multi-writer conflict resolution live behind this
/// trait (last-write-wins assumed); the core only forwards intents and
/// consumes pushes.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Store a new record, assigning its identity.
    async fn create(&self, user: &UserId, data: AccountData) -> Result<RecordId, WriteError>;

    /// Whole-record overwrite of an existing record.
    async fn update(&self, user: &UserId, id: &RecordId, data: AccountData)
    -> Result<(), WriteError>;

    async fn delete(&self, user: &UserId, id: &RecordId) -> Result<(), WriteError>;

    /// Open a live snapshot stream over the user's collection.
    async fn subscribe(&self, user: &UserId) -> Result<Subscription, SyncError>;
}
