use std::time::Duration;

/// Client connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Account email for authentication
    pub email: String,

    /// Account password for authentication
    pub password: String,

    /// Whether to register the account if it does not exist yet
    pub sign_up: bool,

    /// How long to wait for the first snapshot after subscribing
    pub subscribe_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            sign_up: false,
            subscribe_timeout: Duration::from_secs(30),
        }
    }

    /// Register instead of signing in.
    pub fn sign_up(mut self, sign_up: bool) -> Self {
        self.sign_up = sign_up;
        self
    }

    /// Set the first-snapshot timeout
    pub fn subscribe_timeout(mut self, timeout: Duration) -> Self {
        self.subscribe_timeout = timeout;
        self
    }
}
