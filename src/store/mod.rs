//! Local record store.
//!
//! Holds the latest full snapshot pushed by the gateway. Whole-snapshot
//! replacement is intentional: the store is never observed in a state
//! reflecting an unconfirmed client-side mutation.

use crate::core::{AccountRecord, RecordId, SyncError};
use crate::gateway::Delivery;
use log::{debug, warn};

#[derive(Default)]
pub struct RecordStore {
    records: Vec<AccountRecord>,
    /// Set when the subscription reports a failure; the snapshot above stays
    /// resident until a later delivery replaces it.
    last_sync_error: Option<SyncError>,
    /// False until the first delivery lands.
    synced: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one gateway delivery, in arrival order.
    pub fn apply(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Snapshot(records) => {
                debug!("snapshot applied: {} records", records.len());
                self.records = records;
                self.last_sync_error = None;
                self.synced = true;
            }
            Delivery::Interrupted(error) => {
                warn!("subscription interrupted, keeping last snapshot: {error}");
                self.last_sync_error = Some(error);
            }
        }
    }

    pub fn records(&self) -> &[AccountRecord] {
        &self.records
    }

    pub fn find(&self, id: &RecordId) -> Option<&AccountRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether at least one snapshot has been applied.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn last_sync_error(&self) -> Option<&SyncError> {
        self.last_sync_error.as_ref()
    }
}
