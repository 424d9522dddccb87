//! Session gating for the budget views.
//!
//! The credential is an opaque token owned by whoever signed the user in.
//! This module only reads it and hands it down the call chain as a
//! [`Session`]; it never validates or refreshes it.

use std::fmt;

/// Route of the sign-in view
pub const LOGIN_PATH: &str = "/login";

/// Opaque credential attached verbatim as the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wrap a stored token. Blank tokens count as "not signed in".
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self { token })
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Read-only view of persistent credential storage
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<Session>;
}

/// Moves the user to another view
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// In-memory store, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    token: Option<String>,
}

impl MemoryCredentialStore {
    pub fn empty() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Session> {
        self.token.clone().and_then(Session::new)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Admitted(Session),
    Redirected,
}

impl GuardOutcome {
    pub fn session(self) -> Option<Session> {
        match self {
            GuardOutcome::Admitted(session) => Some(session),
            GuardOutcome::Redirected => None,
        }
    }
}

/// Checks for a stored credential once on view entry
pub struct SessionGuard;

impl SessionGuard {
    pub fn enter(store: &dyn CredentialStore, navigator: &dyn Navigator) -> GuardOutcome {
        match store.load() {
            Some(session) => {
                tracing::debug!("Session present, entering budget view");
                GuardOutcome::Admitted(session)
            }
            None => {
                tracing::info!("No stored session, redirecting to {}", LOGIN_PATH);
                navigator.redirect(LOGIN_PATH);
                GuardOutcome::Redirected
            }
        }
    }
}
