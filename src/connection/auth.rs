use crate::core::{AuthError, Result, UserId};
use lazy_static::lazy_static;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A signed-up user account.
#[derive(Debug, Clone)]
pub struct User {
    email: String,
    password_hash: String,
    user_id: UserId,
}

impl User {
    fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            user_id: UserId::generate(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stable identity scoping this user's gateway collection.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Email/password authentication manager.
///
/// Stand-in for the hosted authentication service: sign-up assigns the
/// stable [`UserId`] that scopes every gateway operation for that user.
pub struct AuthManager {
    users: RwLock<HashMap<String, User>>,
}

// Global singleton instance of AuthManager
lazy_static! {
    static ref GLOBAL_AUTH_MANAGER: Arc<AuthManager> = Arc::new(AuthManager::new());
}

impl AuthManager {
    const MIN_PASSWORD_LEN: usize = 6;

    /// Get the global AuthManager instance shared across all clients, so a
    /// user signed up through one client can sign in through any other.
    pub fn global() -> &'static Arc<AuthManager> {
        &GLOBAL_AUTH_MANAGER
    }

    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Hashes a password using bcrypt with the default cost factor. Each
    /// hash carries a random salt, so equal passwords hash differently.
    fn hash_password(password: &str) -> String {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).expect("Failed to hash password")
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    fn validate_email(email: &str) -> Result<()> {
        // Shallow shape check only; real deliverability is not our problem.
        let valid = email.contains('@')
            && !email.starts_with('@')
            && !email.ends_with('@')
            && !email.contains(char::is_whitespace);
        if !valid {
            return Err(AuthError::InvalidEmail(email.to_string()).into());
        }
        Ok(())
    }

    fn validate_password(password: &str) -> Result<()> {
        if password.len() < Self::MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(Self::MIN_PASSWORD_LEN).into());
        }
        Ok(())
    }

    /// Register a new account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        Self::validate_email(email)?;
        Self::validate_password(password)?; // Validate BEFORE hashing

        let mut users = self.users.write().await;

        if users.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse(email.to_string()).into());
        }

        let user = User::new(email.to_string(), Self::hash_password(password));
        info!("signed up user {} ({})", email, user.user_id());
        users.insert(email.to_string(), user.clone());

        Ok(user)
    }

    /// Authenticate an existing account.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let users = self.users.read().await;

        let user = users
            .get(email)
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        if !Self::verify_password(password, user.password_hash()) {
            return Err(AuthError::WrongPassword.into());
        }

        debug!("signed in user {email}");
        Ok(user.clone())
    }

    pub async fn list_users(&self) -> Vec<String> {
        let users = self.users.read().await;
        users.keys().cloned().collect()
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}
