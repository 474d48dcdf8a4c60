// ============================================================================
// AccountBook Library
// ============================================================================

pub mod connection;
pub mod core;
pub mod filter;
pub mod gateway;
pub mod session;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use crate::core::{
    AccountData, AccountRecord, AuthError, BookError, RecordId, Result, SyncError, UserId,
    WriteError,
};
pub use filter::{BalanceFilter, CodeFilter, FilterConfig, PhoneFilter};
pub use view::{NO_URL_GROUP, Projection, SummaryStats, UrlGroup};

// Re-export connection API
pub use connection::{AuthManager, ConnectionConfig, User};
pub use gateway::{Delivery, Gateway, MemoryGateway, Subscription};
pub use session::{Session, SessionEvent};

use log::debug;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

// ============================================================================
// High-level Client API
// ============================================================================

/// One signed-in user's live view of their account collection.
///
/// Connecting authenticates, subscribes to the user's collection, and spawns
/// the pump task that applies gateway deliveries to the session in arrival
/// order. User intents (add/edit/delete) are forwarded verbatim to the
/// gateway; the local snapshot only changes when the gateway pushes it back.
///
/// # Examples
///
/// ```
/// use accountbook::{AccountData, Client};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> accountbook::Result<()> {
/// let client = Client::sign_up("doc-client@example.com", "hunter22").await?;
///
/// client
///     .add_account(AccountData::new("alice", "s3cret").url("shop.example").balance(40.0))
///     .await?;
/// client.wait_for_records(1).await?;
///
/// let view = client.projection().await;
/// assert_eq!(view.stats.total, 1);
/// assert_eq!(view.groups[0].key, "shop.example");
/// # Ok(())
/// # }
/// ```
pub struct Client {
    gateway: Arc<dyn Gateway>,
    user: User,
    session: Arc<RwLock<Session>>,
    revision: watch::Receiver<u64>,
    pump: JoinHandle<()>,
}

impl Client {
    /// Sign in with email and password against the process-global auth
    /// manager and gateway.
    pub async fn connect(email: &str, password: &str) -> Result<Self> {
        Self::connect_with_config(ConnectionConfig::new(email, password)).await
    }

    /// Register a new user, then connect.
    pub async fn sign_up(email: &str, password: &str) -> Result<Self> {
        Self::connect_with_config(ConnectionConfig::new(email, password).sign_up(true)).await
    }

    /// Connect against the process-global gateway.
    pub async fn connect_with_config(config: ConnectionConfig) -> Result<Self> {
        let gateway: Arc<dyn Gateway> = MemoryGateway::global().clone();
        Self::connect_with_gateway(config, gateway).await
    }

    /// Connect against an explicit gateway implementation.
    pub async fn connect_with_gateway(
        config: ConnectionConfig,
        gateway: Arc<dyn Gateway>,
    ) -> Result<Self> {
        let auth = AuthManager::global();
        let user = if config.sign_up {
            auth.sign_up(&config.email, &config.password).await?
        } else {
            auth.sign_in(&config.email, &config.password).await?
        };

        let mut subscription = gateway.subscribe(user.user_id()).await?;

        let session = Arc::new(RwLock::new(Session::new()));
        let (rev_tx, revision) = watch::channel(0u64);

        // Sole writer of the session's record store: deliveries are applied
        // strictly in arrival order.
        let pump_session = session.clone();
        let pump = tokio::spawn(async move {
            while let Some(delivery) = subscription.next().await {
                let interrupted = matches!(delivery, Delivery::Interrupted(_));
                pump_session
                    .write()
                    .await
                    .handle(SessionEvent::Delivery(delivery));
                rev_tx.send_modify(|rev| *rev += 1);
                if interrupted {
                    break;
                }
            }
            debug!("subscription pump finished");
        });

        let client = Self {
            gateway,
            user,
            session,
            revision,
            pump,
        };

        // The gateway sends the current collection immediately on subscribe.
        tokio::time::timeout(
            config.subscribe_timeout,
            client.wait_until(|s| s.store().is_synced()),
        )
        .await
        .map_err(|_| SyncError::Interrupted("timed out waiting for initial snapshot".into()))??;

        Ok(client)
    }

    pub fn email(&self) -> &str {
        self.user.email()
    }

    pub fn user_id(&self) -> &UserId {
        self.user.user_id()
    }

    // ------------------------------------------------------------------
    // Write intents, forwarded verbatim to the gateway
    // ------------------------------------------------------------------

    /// Store a new account. The local snapshot is untouched until the
    /// gateway pushes the updated collection back.
    pub async fn add_account(&self, data: AccountData) -> Result<RecordId> {
        let id = self
            .gateway
            .create(self.user.user_id(), data.created_now())
            .await?;
        Ok(id)
    }

    /// Whole-record overwrite of an existing account.
    pub async fn update_account(&self, id: &RecordId, data: AccountData) -> Result<()> {
        self.gateway
            .update(self.user.user_id(), id, data.updated_now())
            .await?;
        Ok(())
    }

    pub async fn delete_account(&self, id: &RecordId) -> Result<()> {
        self.gateway.delete(self.user.user_id(), id).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Filter and expansion state
    // ------------------------------------------------------------------

    pub async fn set_filter(&self, filter: FilterConfig) {
        self.session
            .write()
            .await
            .handle(SessionEvent::FilterChanged(filter));
    }

    pub async fn reset_filters(&self) {
        self.session.write().await.handle(SessionEvent::ResetFilters);
    }

    pub async fn toggle_group(&self, key: &str) {
        self.session
            .write()
            .await
            .handle(SessionEvent::ToggleGroup(key.to_string()));
    }

    pub async fn expand_all(&self) {
        self.session.write().await.handle(SessionEvent::ExpandAll);
    }

    pub async fn collapse_all(&self) {
        self.session.write().await.handle(SessionEvent::CollapseAll);
    }

    pub async fn is_expanded(&self, key: &str) -> bool {
        self.session.read().await.is_expanded(key)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Recompute the filtered, grouped view of the resident snapshot.
    pub async fn projection(&self) -> Projection {
        self.session.read().await.projection()
    }

    /// Sorted distinct URL keys over the unfiltered snapshot.
    pub async fn url_keys(&self) -> Vec<String> {
        self.session.read().await.url_keys()
    }

    pub async fn record_count(&self) -> usize {
        self.session.read().await.store().len()
    }

    pub async fn last_sync_error(&self) -> Option<SyncError> {
        self.session.read().await.last_sync_error().cloned()
    }

    // ------------------------------------------------------------------
    // Convergence helpers
    // ------------------------------------------------------------------

    /// Wait until `pred` holds over the session, waking on every applied
    /// delivery. Fails once the subscription pump has shut down for good.
    pub async fn wait_until<F>(&self, mut pred: F) -> Result<()>
    where
        F: FnMut(&Session) -> bool,
    {
        let mut revision = self.revision.clone();
        loop {
            if pred(&*self.session.read().await) {
                return Ok(());
            }
            if revision.changed().await.is_err() {
                return Err(BookError::SessionClosed);
            }
        }
    }

    /// Wait until the resident snapshot holds exactly `count` records.
    pub async fn wait_for_records(&self, count: usize) -> Result<()> {
        self.wait_until(|s| s.store().len() == count).await
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        // Session over: tear the subscription pump down.
        self.pump.abort();
    }
}
