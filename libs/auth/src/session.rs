//! Session persistence across durable and session-scoped storage

use std::sync::Arc;

use common::{
    KeyValueStore, TokenProvider,
    error::{StorageError, StorageResult},
};
use tracing::{info, warn};

use crate::models::{Session, User};

const ACCESS_TOKEN_KEY: &str = "accessToken";
const USER_KEY: &str = "user";

/// Where a session is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// Survives restarts ("remember me")
    Durable,
    /// Lives as long as the current client session
    Session,
}

impl SessionScope {
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            SessionScope::Durable
        } else {
            SessionScope::Session
        }
    }
}

/// Session manager for handling the persisted user session
#[derive(Clone)]
pub struct SessionManager {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    fn store(&self, scope: SessionScope) -> &Arc<dyn KeyValueStore> {
        match scope {
            SessionScope::Durable => &self.durable,
            SessionScope::Session => &self.session,
        }
    }

    /// Persist a session in the chosen scope, clearing the other one first
    pub fn persist(&self, session: &Session, scope: SessionScope) -> StorageResult<()> {
        info!("Persisting session for user: {} ({:?})", session.user.id, scope);

        let other = match scope {
            SessionScope::Durable => SessionScope::Session,
            SessionScope::Session => SessionScope::Durable,
        };
        clear_store(self.store(other).as_ref())?;

        let user = serde_json::to_string(&session.user).map_err(StorageError::Corrupt)?;
        let target = self.store(scope);
        target.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        target.set(USER_KEY, &user)?;

        Ok(())
    }

    /// Scope holding the current token, durable checked first
    pub fn scope(&self) -> Option<SessionScope> {
        [SessionScope::Durable, SessionScope::Session]
            .into_iter()
            .find(|scope| read_token(self.store(*scope).as_ref()).is_some())
    }

    /// Get the current session, if one is stored
    pub fn current_session(&self) -> Option<Session> {
        let scope = self.scope()?;
        let store = self.store(scope);
        let access_token = read_token(store.as_ref())?;

        let user = match store.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Stored user is unreadable: {}", e);
                    return None;
                }
            },
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read stored user: {}", e);
                return None;
            }
        };

        Some(Session { access_token, user })
    }

    /// Check if a token is stored in either scope
    pub fn is_authenticated(&self) -> bool {
        self.scope().is_some()
    }

    /// Delete the session from both scopes
    pub fn clear(&self) -> StorageResult<()> {
        info!("Clearing stored session");
        clear_store(self.durable.as_ref())?;
        clear_store(self.session.as_ref())
    }
}

impl TokenProvider for SessionManager {
    fn access_token(&self) -> Option<String> {
        read_token(self.durable.as_ref()).or_else(|| read_token(self.session.as_ref()))
    }

    fn clear_tokens(&self) {
        if let Err(e) = self.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
    }
}

fn read_token(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(ACCESS_TOKEN_KEY) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            warn!("Failed to read access token: {}", e);
            None
        }
    }
}

fn clear_store(store: &dyn KeyValueStore) -> StorageResult<()> {
    store.delete(ACCESS_TOKEN_KEY)?;
    store.delete(USER_KEY)
}
