//! Session controller.
//!
//! Owns the state the view layer needs: the resident record snapshot, the
//! filter configuration, and the group expansion set. All mutation funnels
//! through [`Session::handle`]; projections are always recomputed fresh from
//! the resident snapshot, never cached across recomputations.

use crate::core::SyncError;
use crate::filter::FilterConfig;
use crate::gateway::Delivery;
use crate::store::RecordStore;
use crate::view::{self, Projection};
use std::collections::HashSet;

/// Everything that can change session state.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A gateway push. Only the subscription pump produces these.
    Delivery(Delivery),
    /// The view replaced the filter configuration.
    FilterChanged(FilterConfig),
    /// All filters back to their no-restriction defaults.
    ResetFilters,
    /// Flip one URL group between expanded and collapsed.
    ToggleGroup(String),
    /// Expand every group of the current projection.
    ExpandAll,
    CollapseAll,
}

pub struct Session {
    store: RecordStore,
    filter: FilterConfig,
    /// Expansion survives filter changes by key identity: a group stays
    /// expanded even while no record of it passes the current filter.
    expanded: HashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            filter: FilterConfig::default(),
            expanded: HashSet::new(),
        }
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Delivery(delivery) => self.store.apply(delivery),
            SessionEvent::FilterChanged(filter) => self.filter = filter,
            SessionEvent::ResetFilters => self.filter = FilterConfig::default(),
            SessionEvent::ToggleGroup(key) => {
                if !self.expanded.remove(&key) {
                    self.expanded.insert(key);
                }
            }
            SessionEvent::ExpandAll => {
                for group in self.projection().groups {
                    self.expanded.insert(group.key);
                }
            }
            SessionEvent::CollapseAll => self.expanded.clear(),
        }
    }

    /// Filtered, grouped view of the resident snapshot.
    pub fn projection(&self) -> Projection {
        view::project(self.store.records(), &self.filter)
    }

    /// Option list for the URL filter, over the unfiltered snapshot.
    pub fn url_keys(&self) -> Vec<String> {
        view::url_keys(self.store.records())
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn last_sync_error(&self) -> Option<&SyncError> {
        self.store.last_sync_error()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
