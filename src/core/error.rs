use thiserror::Error;

/// A create/update/delete call to the gateway failed.
///
/// Writes are never retried automatically and never applied speculatively,
/// so there is no local state to roll back on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("Invalid record: {0}")]
    Invalid(String),

    #[error("Record '{0}' not found")]
    UnknownRecord(String),

    #[error("Permission denied for user '{0}'")]
    PermissionDenied(String),

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

/// The live subscription failed or was interrupted.
///
/// The record store keeps its last snapshot; reconnection policy, if any,
/// belongs to the gateway, not to this core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Subscription permission revoked for user '{0}'")]
    PermissionRevoked(String),

    #[error("Subscription interrupted: {0}")]
    Interrupted(String),
}

/// Authentication collaborator failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("No account found for '{0}'")]
    UserNotFound(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("Email '{0}' is already in use")]
    EmailAlreadyInUse(String),

    #[error("Password too weak: must be at least {0} characters")]
    WeakPassword(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Session closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, BookError>;
