//! Session store: the single signed-in user, held in memory and mirrored to
//! local storage under `skillmatch-user`. Hosted sessions also keep their
//! token, expiry and profile under `skillmatch-credentials`.
//!
//! Lifecycle: created on login, invalidated on logout or token expiry,
//! rehydrated from storage at startup. Restoration fails open: an unreadable
//! record is dropped and the service starts signed out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::storage::{LocalStorage, StorageError};
use crate::models::{Profile, User};

pub const SESSION_STORAGE_KEY: &str = "skillmatch-user";
pub const CREDENTIALS_STORAGE_KEY: &str = "skillmatch-credentials";

/// An authenticated session. Mock logins carry only the user; hosted logins
/// also carry the profile row and the backend's access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn local(user: User) -> Self {
        Self {
            user,
            profile: None,
            access_token: None,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// What a hosted session needs beyond the user record to survive a restart.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    profile: Option<Profile>,
}

impl StoredCredentials {
    fn from_session(session: &Session) -> Option<Self> {
        session.access_token.as_ref().map(|token| StoredCredentials {
            access_token: token.clone(),
            expires_at: session.expires_at,
            profile: session.profile.clone(),
        })
    }

    fn apply(self, session: &mut Session) {
        session.access_token = Some(self.access_token);
        session.expires_at = self.expires_at;
        session.profile = self.profile;
    }
}

/// Point-in-time view of the store, as consumed by the route guard.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}

struct SessionInner {
    session: Option<Session>,
    is_loading: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
    storage: LocalStorage,
}

impl SessionStore {
    /// A new store starts loading until `restore` runs.
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                session: None,
                is_loading: true,
            })),
            storage,
        }
    }

    /// Seeds the in-memory session from storage. Never fails.
    pub async fn restore(&self) {
        let restored = match self.storage.get(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restored session for {}", user.email);
                    let mut session = Session::local(user);
                    if let Some(credentials) = self.stored_credentials() {
                        credentials.apply(&mut session);
                    }
                    Some(session)
                }
                Err(e) => {
                    warn!("Discarding unreadable stored session: {e}");
                    self.remove_stored();
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Session storage unavailable, starting signed out: {e}");
                None
            }
        };

        let mut inner = self.inner.write().await;
        inner.session = restored;
        inner.is_loading = false;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.invalidate_expired(Utc::now()).await;
        let inner = self.inner.read().await;
        SessionSnapshot {
            session: inner.session.clone(),
            is_loading: inner.is_loading,
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.snapshot().await.session
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current().await.map(|s| s.user)
    }

    /// Marks the store as loading until the returned attempt is aborted,
    /// completed or dropped.
    pub async fn begin_login(&self) -> LoginAttempt {
        self.inner.write().await.is_loading = true;
        LoginAttempt {
            inner: Some(Arc::clone(&self.inner)),
        }
    }

    /// Stores the user record verbatim and keeps the full session in memory.
    pub async fn establish(&self, session: Session) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        inner.is_loading = false;
        let raw = serde_json::to_string(&session.user)?;
        self.storage.set(SESSION_STORAGE_KEY, raw)?;
        match StoredCredentials::from_session(&session) {
            Some(credentials) => self
                .storage
                .set(CREDENTIALS_STORAGE_KEY, serde_json::to_string(&credentials)?)?,
            None => self.storage.remove(CREDENTIALS_STORAGE_KEY)?,
        }
        inner.session = Some(session);
        Ok(())
    }

    /// Clears memory first, then storage. Returns the session that was active.
    pub async fn clear(&self) -> Option<Session> {
        let previous = {
            let mut inner = self.inner.write().await;
            inner.is_loading = false;
            inner.session.take()
        };
        self.remove_stored();
        previous
    }

    async fn invalidate_expired(&self, now: DateTime<Utc>) {
        let expired = {
            let inner = self.inner.read().await;
            inner.session.as_ref().is_some_and(|s| s.is_expired(now))
        };
        if !expired {
            return;
        }
        // Re-checked under the write lock: a login may have replaced the session.
        if take_expired(&mut *self.inner.write().await, now).is_some() {
            info!("Session token expired, signing out");
            self.remove_stored();
        }
    }

    fn stored_credentials(&self) -> Option<StoredCredentials> {
        match self.storage.get(CREDENTIALS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(credentials) => Some(credentials),
                Err(e) => {
                    warn!("Discarding unreadable stored credentials: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Stored credentials unavailable: {e}");
                None
            }
        }
    }

    fn remove_stored(&self) {
        for key in [SESSION_STORAGE_KEY, CREDENTIALS_STORAGE_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to clear stored {key}: {e}");
            }
        }
    }
}

fn take_expired(inner: &mut SessionInner, now: DateTime<Utc>) -> Option<Session> {
    if inner.session.as_ref().is_some_and(|s| s.is_expired(now)) {
        inner.session.take()
    } else {
        None
    }
}

/// An in-flight login. Whichever way it ends, the store stops loading; a
/// dropped attempt (cancelled request) resets the flag on drop.
pub struct LoginAttempt {
    inner: Option<Arc<RwLock<SessionInner>>>,
}

impl LoginAttempt {
    /// Login failed: stop loading, keep whatever session was there.
    pub async fn abort(mut self) {
        if let Some(inner) = self.inner.take() {
            inner.write().await.is_loading = false;
        }
    }

    /// The session was established, which already cleared the flag.
    pub fn complete(mut self) {
        self.inner = None;
    }
}

impl Drop for LoginAttempt {
    fn drop(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        if let Ok(mut guard) = inner.try_write() {
            guard.is_loading = false;
            return;
        }
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    inner.write().await.is_loading = false;
                });
            }
            Err(_) => warn!("Login cancelled outside the runtime; loading flag left set"),
        }
    }
}
