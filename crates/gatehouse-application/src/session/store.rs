//! Session lifecycle: login, restore, logout.
//!
//! Two states: **Anonymous** (no session) and **Authenticated**. A successful
//! login moves to Authenticated (replacing any previous session), logout
//! moves to Anonymous and is a no-op when already there. Reads never change
//! the logical state but may populate the cache from the durable slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use gatehouse_core::Session;
use gatehouse_core::auth::{AuthError, Authenticator, SimulatedAuthenticator};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::Result;
use gatehouse_core::storage::{KeyValueStore, SESSION_SLOT_KEY};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::sync::CancellationToken;

use super::cache::SessionCache;

/// The in-flight login, if any. Only the most recent attempt is tracked.
struct PendingLogin {
    id: u64,
    token: CancellationToken,
}

/// Owns the current session and its durable slot.
///
/// Construct one per process (or per simulated browser profile) and share it
/// through `Arc`. A fresh instance starts with an empty cache, which is how
/// a page reload is modelled.
///
/// # Example
///
/// ```ignore
/// let store = SessionStore::new(Arc::new(InMemoryKeyValueStore::new()), Arc::new(SimulatedAuthenticator::default()));
/// let session = store.login("a@b.com", "secret1").await?;
/// assert!(store.is_authenticated().await);
/// store.logout().await?;
/// ```
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    authenticator: Arc<dyn Authenticator>,
    slot_key: String,
    cache: SessionCache,
    pending: Mutex<Option<PendingLogin>>,
    next_login_id: AtomicU64,
    /// Serializes every change to the durable slot together with the cache.
    commit: AsyncMutex<()>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            storage,
            authenticator,
            slot_key: SESSION_SLOT_KEY.to_string(),
            cache: SessionCache::new(),
            pending: Mutex::new(None),
            next_login_id: AtomicU64::new(0),
            commit: AsyncMutex::new(()),
        }
    }

    /// Builds a store with the simulated authenticator and slot key from `config`.
    pub fn from_config(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            storage,
            Arc::new(SimulatedAuthenticator::from_settings(&config.auth)),
        )
        .with_slot_key(config.storage.session_key.clone())
    }

    pub fn with_slot_key(mut self, slot_key: impl Into<String>) -> Self {
        self.slot_key = slot_key.into();
        self
    }

    /// Authenticates and, on success, persists and caches a new session.
    ///
    /// Starting a login cancels any login still pending on this store; the
    /// superseded call resolves with [`AuthError::Cancelled`]. A login that
    /// is already writing its session when cancelled finishes the write, and
    /// the cancelling logout or login is applied after it.
    ///
    /// On failure nothing is written and the cache is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> std::result::Result<Session, AuthError> {
        self.login_with_cancel(email, password, CancellationToken::new())
            .await
    }

    /// Like [`login`](Self::login), but also gives up when `cancel` fires.
    pub async fn login_with_cancel(
        &self,
        email: &str,
        password: &str,
        cancel: CancellationToken,
    ) -> std::result::Result<Session, AuthError> {
        let attempt = self.begin_attempt();

        let verdict = tokio::select! {
            biased;
            _ = attempt.token.cancelled() => Err(AuthError::Cancelled),
            _ = cancel.cancelled() => Err(AuthError::Cancelled),
            verdict = self.authenticator.authenticate(email, password) => verdict,
        };

        if let Err(err) = verdict {
            match &err {
                AuthError::Cancelled => tracing::info!(email = %email, "Login cancelled"),
                _ => tracing::info!(email = %email, error = %err, "Login rejected"),
            }
            return Err(err);
        }

        let _commit = self.commit.lock().await;
        if attempt.token.is_cancelled() || cancel.is_cancelled() {
            tracing::info!(email = %email, "Login cancelled before commit");
            return Err(AuthError::Cancelled);
        }

        let session = Session::new(email);
        self.storage
            .set(&self.slot_key, session.to_json()?)
            .await?;
        self.cache.set(session.clone()).await;

        tracing::info!(email = %session.email, login_time = %session.login_time, "Login succeeded");
        Ok(session)
    }

    /// Destroys the current session.
    ///
    /// Cancels a pending login, removes the durable slot and clears the
    /// cache. Safe to call when no session exists. Navigation is left to the
    /// caller.
    pub async fn logout(&self) -> Result<()> {
        self.cancel_pending();

        let _commit = self.commit.lock().await;
        let removed = self.storage.remove(&self.slot_key).await;
        self.cache.clear().await;

        removed?;
        tracing::info!(slot = %self.slot_key, "Logged out");
        Ok(())
    }

    /// Returns the current session, restoring it from the durable slot if
    /// the cache is empty.
    ///
    /// A populated cache is never re-read. Unreadable or corrupt slot
    /// contents count as "no session"; a corrupt entry is also removed.
    pub async fn current_user(&self) -> Option<Session> {
        if let Some(session) = self.cache.get().await {
            return Some(session);
        }

        let _commit = self.commit.lock().await;
        if let Some(session) = self.cache.get().await {
            return Some(session);
        }

        let raw = match self.storage.get(&self.slot_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(slot = %self.slot_key, error = %e, "Failed to read session slot");
                return None;
            }
        };

        match Session::from_json(&raw) {
            Ok(session) => {
                tracing::debug!(email = %session.email, "Session restored from durable slot");
                self.cache.set(session.clone()).await;
                Some(session)
            }
            Err(e) => {
                tracing::warn!(slot = %self.slot_key, error = %e, "Discarding corrupt session record");
                if let Err(e) = self.storage.remove(&self.slot_key).await {
                    tracing::warn!(slot = %self.slot_key, error = %e, "Failed to clear corrupt session record");
                }
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_user().await.is_some()
    }

    fn begin_attempt(&self) -> AttemptGuard<'_> {
        let id = self.next_login_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(PendingLogin {
                id,
                token: token.clone(),
            });
        if let Some(previous) = previous {
            tracing::debug!("Superseding pending login");
            previous.token.cancel();
        }

        AttemptGuard {
            store: self,
            id,
            token,
        }
    }

    fn cancel_pending(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.token.cancel();
        }
    }
}

/// Unregisters a login attempt when it finishes or its future is dropped.
struct AttemptGuard<'a> {
    store: &'a SessionStore,
    id: u64,
    token: CancellationToken,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self
            .store
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if pending.as_ref().is_some_and(|p| p.id == self.id) {
            *pending = None;
        }
    }
}
