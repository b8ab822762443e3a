use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cookie::{CookieMirror, CookiePolicy, MemoryCookieJar};
use super::storage::{SessionStorage, create_storage};
use crate::config::SessionConfig;
use crate::models::User;

/// Credentials and cached user. Serialized field names match the persisted record.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Where the session stands, derived from which fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// No access token.
    Anonymous,
    /// An access token was issued but the user profile has not been fetched (or the fetch failed).
    /// Requests carry the token, but the session does not count as authenticated.
    ProfilePending,
    Authenticated,
}

impl SessionState {
    pub fn status(&self) -> AuthStatus {
        match (&self.access_token, &self.user) {
            (None, _) => AuthStatus::Anonymous,
            (Some(_), None) => AuthStatus::ProfilePending,
            (Some(_), Some(_)) => AuthStatus::Authenticated,
        }
    }
}

/// The on-disk envelope around [`SessionState`].
#[derive(Serialize, Deserialize)]
struct PersistedSession {
    state: SessionState,
    #[serde(default)]
    version: u32,
}

const RECORD_VERSION: u32 = 0;

/// Single source of truth for the client's credentials.
///
/// Every mutation is written through to durable storage, and every access-token
/// change is mirrored into a cookie for the route guard. The cookie changes under
/// the same write lock as the state, so the two never disagree. Both side channels are
/// best effort: a failed write is logged and the in-memory state still changes.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
    cookies: Arc<dyn CookieMirror>,
    policy: CookiePolicy,
}

impl SessionStore {
    /// An empty session. Nothing is read from `storage`.
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        cookies: Arc<dyn CookieMirror>,
        policy: CookiePolicy,
    ) -> Self {
        SessionStore {
            state: RwLock::new(SessionState::default()),
            storage,
            cookies,
            policy,
        }
    }

    /// Rebuilds the session from durable storage and re-syncs the cookie mirror
    /// from the restored access token.
    ///
    /// A missing, unreadable or corrupt record yields an empty session.
    pub fn restore(
        storage: Arc<dyn SessionStorage>,
        cookies: Arc<dyn CookieMirror>,
        policy: CookiePolicy,
    ) -> Self {
        let state = load_state(storage.as_ref());
        if let Some(token) = &state.access_token {
            cookies.set(policy.session_cookie(token));
        }
        info!(
            event_name = "session.restored",
            event_domain = "session",
            status = ?state.status(),
            "session restored from storage"
        );
        SessionStore {
            state: RwLock::new(state),
            storage,
            cookies,
            policy,
        }
    }

    /// Restores a session using the configured backend and an in-process cookie jar.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::restore(
            create_storage(&config.storage),
            Arc::new(MemoryCookieJar::new()),
            CookiePolicy::from_config(config),
        )
    }

    /// Replaces both tokens and mirrors the new access token into the cookie.
    pub fn set_tokens(&self, access: &str, refresh: &str) {
        let mut state = self.write();
        self.cookies.set(self.policy.session_cookie(access));
        state.access_token = Some(access.to_string());
        state.refresh_token = Some(refresh.to_string());
        self.persist(&state);
        debug!(event_name = "session.tokens_set", event_domain = "session", "tokens replaced");
    }

    /// Replaces the cached user. The tokens are left untouched.
    pub fn set_user(&self, user: User) {
        let mut state = self.write();
        state.user = Some(user);
        self.persist(&state);
    }

    /// Forgets tokens and user and deletes the cookie mirror. Safe to call repeatedly.
    pub fn clear_auth(&self) {
        let mut state = self.write();
        self.cookies.remove(self.policy.removal_cookie());
        *state = SessionState::default();
        self.persist(&state);
        debug!(event_name = "session.cleared", event_domain = "session", "session cleared");
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.read().status()
    }

    /// True iff both an access token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    /// The cookie value the route guard would currently see.
    pub fn mirrored_cookie(&self) -> Option<String> {
        self.cookies.get(&self.policy.name)
    }

    pub fn cookie_policy(&self) -> &CookiePolicy {
        &self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &SessionState) {
        let envelope = PersistedSession {
            state: state.clone(),
            version: RECORD_VERSION,
        };
        let record = match serde_json::to_string(&envelope) {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to serialize session: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(&record) {
            warn!(
                event_name = "session.persist_failed",
                event_domain = "session",
                error = %e,
                "session change kept in memory only"
            );
        }
    }
}

fn load_state(storage: &dyn SessionStorage) -> SessionState {
    let record = match storage.read() {
        Ok(Some(record)) => record,
        Ok(None) => return SessionState::default(),
        Err(e) => {
            warn!("Could not read stored session, starting signed out: {}", e);
            return SessionState::default();
        }
    };
    match serde_json::from_str::<PersistedSession>(&record) {
        Ok(envelope) => envelope.state,
        Err(e) => {
            warn!(
                event_name = "session.corrupt_record",
                event_domain = "session",
                error = %e,
                "stored session is unreadable, starting signed out"
            );
            SessionState::default()
        }
    }
}
