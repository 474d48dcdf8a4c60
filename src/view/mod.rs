//! Grouping and aggregation engine.
//!
//! Projects the resident record snapshot through the filter configuration
//! into URL groups plus summary statistics. Recomputed from scratch on every
//! call; never incrementally patched.

use crate::core::AccountRecord;
use crate::filter::FilterConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group key for records without a URL.
pub const NO_URL_GROUP: &str = "No URL";

/// One bucket of records sharing a URL value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlGroup {
    pub key: String,
    pub accounts: Vec<AccountRecord>,
}

/// Summary statistics over the filtered set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub with_balance: usize,
    pub with_code: usize,
    pub with_phone_verified: usize,
    pub total_balance: f64,
}

/// Filtered, grouped view of the record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    /// Groups in lexicographic key order; the sentinel key sorts like any
    /// other string, it is not pinned first or last.
    pub groups: Vec<UrlGroup>,
    pub stats: SummaryStats,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, key: &str) -> Option<&UrlGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

fn group_key(record: &AccountRecord) -> &str {
    if record.data.url.is_empty() {
        NO_URL_GROUP
    } else {
        &record.data.url
    }
}

/// Filter, partition by URL, and aggregate.
///
/// Deterministic and O(n) over the record set; within a group, records keep
/// the store's insertion order. An empty filtered set yields zero groups and
/// all-zero statistics.
pub fn project(records: &[AccountRecord], filter: &FilterConfig) -> Projection {
    let mut groups: BTreeMap<&str, Vec<AccountRecord>> = BTreeMap::new();
    let mut stats = SummaryStats::default();

    for record in records.iter().filter(|r| filter.matches(r)) {
        stats.total += 1;
        if record.data.balance > 0.0 {
            stats.with_balance += 1;
        }
        if record.data.code_requested {
            stats.with_code += 1;
        }
        if record.data.phone_verified {
            stats.with_phone_verified += 1;
        }
        stats.total_balance += record.data.balance;

        groups.entry(group_key(record)).or_default().push(record.clone());
    }

    Projection {
        groups: groups
            .into_iter()
            .map(|(key, accounts)| UrlGroup {
                key: key.to_string(),
                accounts,
            })
            .collect(),
        stats,
    }
}

/// Sorted distinct group keys of the full, unfiltered store.
///
/// Feeds the URL filter's option list, so it reflects every record, not just
/// the ones passing the current filter.
pub fn url_keys(records: &[AccountRecord]) -> Vec<String> {
    let mut keys: Vec<String> = records
        .iter()
        .map(|r| group_key(r).to_string())
        .collect();
    keys.sort();
    keys.dedup();
    keys
}
