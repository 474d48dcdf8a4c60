pub mod error;
pub mod record;

pub use error::{AuthError, BookError, Result, SyncError, WriteError};
pub use record::{AccountData, AccountRecord, RecordId, UserId};
