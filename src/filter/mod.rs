//! Filter predicate engine.
//!
//! Five independent predicates applied as a logical AND. Matching is a pure
//! function of one record and one configuration; the engine holds no state.

use crate::core::AccountRecord;
use serde::{Deserialize, Serialize};

/// Balance bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceFilter {
    #[default]
    All,
    /// balance > 0
    HasMoney,
    /// balance <= 0
    NoMoney,
}

/// Code-requested bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeFilter {
    #[default]
    All,
    Requested,
    NotRequested,
}

/// Phone-verified bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneFilter {
    #[default]
    All,
    Verified,
    NotVerified,
}

/// Current filter configuration. Default imposes no restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Exact URL match; empty means any URL.
    #[serde(default)]
    pub url: String,

    /// Substring search over username (case-insensitive) and phone.
    /// The needle is lowercased before both comparisons; the phone itself is
    /// compared verbatim, so a letter-bearing phone only matches a lowercase
    /// needle. Deliberate asymmetry, pinned by tests.
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub balance: BalanceFilter,

    #[serde(default)]
    pub code: CodeFilter,

    #[serde(default)]
    pub phone: PhoneFilter,
}

impl FilterConfig {
    /// Restrict to one exact URL.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_balance(mut self, balance: BalanceFilter) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_code(mut self, code: CodeFilter) -> Self {
        self.code = code;
        self
    }

    pub fn with_phone(mut self, phone: PhoneFilter) -> Self {
        self.phone = phone;
        self
    }

    /// Whether `record` passes every predicate of this configuration.
    pub fn matches(&self, record: &AccountRecord) -> bool {
        let data = &record.data;

        if !self.url.is_empty() && data.url != self.url {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !data.username.to_lowercase().contains(&needle) && !data.phone.contains(&needle) {
                return false;
            }
        }

        match self.balance {
            BalanceFilter::All => {}
            BalanceFilter::HasMoney => {
                if data.balance <= 0.0 {
                    return false;
                }
            }
            BalanceFilter::NoMoney => {
                if data.balance > 0.0 {
                    return false;
                }
            }
        }

        match self.code {
            CodeFilter::All => {}
            CodeFilter::Requested => {
                if !data.code_requested {
                    return false;
                }
            }
            CodeFilter::NotRequested => {
                if data.code_requested {
                    return false;
                }
            }
        }

        match self.phone {
            PhoneFilter::All => {}
            PhoneFilter::Verified => {
                if !data.phone_verified {
                    return false;
                }
            }
            PhoneFilter::NotVerified => {
                if data.phone_verified {
                    return false;
                }
            }
        }

        true
    }
}
