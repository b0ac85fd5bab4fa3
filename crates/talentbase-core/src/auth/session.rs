use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::models::{AuthResponse, User};

use super::store::{TokenBackend, TokenKey};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup, before any check has run
    Unknown,
    /// A login, registration or startup check is in flight
    Authenticating,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unknown => "unknown",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Unauthenticated => "unauthenticated",
        }
    }
}

struct SessionInner {
    backend: Box<dyn TokenBackend>,
    state: Mutex<SessionState>,
}

/// The single owner of authentication state: persisted tokens plus the
/// in-memory identity.
///
/// Clone is cheap and every clone sees the same state. The request pipeline
/// and the [`SessionManager`](super::SessionManager) share one `Session`.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(backend: impl TokenBackend + 'static) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn TokenBackend>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                backend,
                state: Mutex::new(SessionState::Unknown),
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub(crate) fn set_state(&self, state: SessionState) {
        let mut current = self.lock_state();
        debug!(from = current.label(), to = state.label(), "Session state change");
        *current = state;
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock_state().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.lock_state(), SessionState::Authenticated(_))
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.backend.get(TokenKey::Access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.backend.get(TokenKey::Refresh)
    }

    /// Persist both tokens and record the identity they belong to.
    pub(crate) fn establish(&self, auth: &AuthResponse) {
        self.store(TokenKey::Access, &auth.access_token);
        self.store(TokenKey::Refresh, &auth.refresh_token);
        self.set_state(SessionState::Authenticated(auth.user.clone()));
    }

    pub(crate) fn replace_access_token(&self, token: &str) {
        self.store(TokenKey::Access, token);
    }

    /// Erase persisted tokens and the identity. Never fails.
    pub fn clear(&self) {
        for key in [TokenKey::Access, TokenKey::Refresh] {
            if let Err(e) = self.inner.backend.remove(key) {
                warn!(error = %e, key = key.as_str(), "Failed to erase stored token");
            }
        }
        self.set_state(SessionState::Unauthenticated);
    }

    fn store(&self, key: TokenKey, value: &str) {
        if let Err(e) = self.inner.backend.set(key, value) {
            warn!(error = %e, key = key.as_str(), "Failed to persist token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryBackend;
    use crate::models::Role;

    fn auth(access: &str, refresh: &str) -> AuthResponse {
        AuthResponse {
            access_token: access.into(),
            refresh_token: refresh.into(),
            user: User {
                id: 1,
                name: "Ana".into(),
                email: "a@b.com".into(),
                role: Role::Candidate,
            },
        }
    }

    #[test]
    fn test_new_session_is_unknown() {
        let session = Session::new(MemoryBackend::new());
        assert_eq!(session.state(), SessionState::Unknown);
        assert!(session.current_user().is_none());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_establish_and_clear() {
        let session = Session::new(MemoryBackend::new());
        session.establish(&auth("AT1", "RT1"));

        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("AT1"));
        assert_eq!(session.refresh_token().as_deref(), Some("RT1"));
        assert_eq!(session.current_user().map(|u| u.id), Some(1));

        session.clear();
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new(MemoryBackend::new());
        let other = session.clone();
        session.establish(&auth("AT1", "RT1"));
        other.replace_access_token("AT2");

        assert_eq!(session.access_token().as_deref(), Some("AT2"));
        assert_eq!(session.refresh_token().as_deref(), Some("RT1"));
        assert!(other.is_authenticated());
    }
}
