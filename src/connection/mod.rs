pub mod auth;
pub mod config;

pub use auth::{AuthManager, User};
pub use config::ConnectionConfig;
