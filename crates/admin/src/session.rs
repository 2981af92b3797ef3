use std::collections::HashSet;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use farmstand_core::{DomainError, DomainResult};

/// Opaque handle to an authenticated admin session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn mint() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::Unauthorized)
    }
}

/// Process-scoped admin sessions.
///
/// Each successful login mints its own token, so two admins (or two tabs)
/// never share authentication state. Sessions live in memory only and reset
/// on restart. No lockout or rate limiting.
pub struct SessionStore {
    password: String,
    active: RwLock<HashSet<SessionToken>>,
}

impl SessionStore {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            active: RwLock::new(HashSet::new()),
        }
    }

    /// Compare against the shared secret; mint a token on success.
    pub fn login(&self, password: &str) -> DomainResult<SessionToken> {
        if password != self.password {
            warn!("admin login rejected");
            return Err(DomainError::Unauthorized);
        }

        let token = SessionToken::mint();
        self.active
            .write()
            .map_err(|_| DomainError::store_unavailable("session lock poisoned"))?
            .insert(token);
        info!("admin login accepted");
        Ok(token)
    }

    /// Drop the session. Removing an unknown token is a no-op.
    pub fn logout(&self, token: &SessionToken) {
        if let Ok(mut active) = self.active.write() {
            active.remove(token);
        }
    }

    pub fn is_authenticated(&self, token: &SessionToken) -> bool {
        self.active
            .read()
            .map(|active| active.contains(token))
            .unwrap_or(false)
    }

    /// Errors with `Unauthorized` unless the token belongs to a live session.
    pub fn require(&self, token: &SessionToken) -> DomainResult<()> {
        if self.is_authenticated(token) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
