use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable record identity, assigned by the gateway on create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identity (gateway-side use).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque, stable identity of the owning user, assigned at sign-up.
///
/// Scopes every gateway operation to one collection; a record belongs to
/// exactly one owning user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The writable fields of one account entry.
///
/// Create and edit are whole-record writes: the gateway stores exactly what
/// it is handed, timestamps included (set by the writer, never validated).
/// Optional fields carry serde defaults so a partial record decodes to the
/// documented defaults (empty string / 0 / false) instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    /// Grouping key; empty means "ungrouped".
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    /// Stored in clear, as the backing service stores it.
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub phone_verified: bool,

    #[serde(default)]
    pub code_requested: bool,

    #[serde(default)]
    pub balance: f64,

    #[serde(default)]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AccountData {
    /// Builder-style constructor for the two required fields.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn phone_verified(mut self, verified: bool) -> Self {
        self.phone_verified = verified;
        self
    }

    pub fn code_requested(mut self, requested: bool) -> Self {
        self.code_requested = requested;
        self
    }

    pub fn created_now(mut self) -> Self {
        self.created_at = Some(Utc::now());
        self
    }

    pub fn updated_now(mut self) -> Self {
        self.updated_at = Some(Utc::now());
        self
    }
}

/// One stored account entry: gateway identity plus its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: RecordId,

    #[serde(flatten)]
    pub data: AccountData,
}

impl AccountRecord {
    pub fn new(id: RecordId, data: AccountData) -> Self {
        Self { id, data }
    }
}
