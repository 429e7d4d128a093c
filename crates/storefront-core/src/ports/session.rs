//! Session storage port and the explicit session context built on it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the role flag.
pub const ROLE_KEY: &str = "userRole";
/// Role that unlocks destructive actions in the UI.
pub const ADMIN_ROLE: &str = "admin";

/// Client-held key/value storage (browser local storage, a file, memory).
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Session data is corrupt: {0}")]
    Corrupt(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::storage(err.to_string())
    }
}

/// Session context handed to clients and views instead of reading ambient storage.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Bearer token, if one is stored. An empty value counts as absent.
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        self.non_empty(TOKEN_KEY).await
    }

    pub async fn role(&self) -> Result<Option<String>, SessionError> {
        self.non_empty(ROLE_KEY).await
    }

    /// Whether the stored role is admin. This only drives the UI; the backend decides.
    pub async fn is_admin(&self) -> Result<bool, SessionError> {
        Ok(self.role().await?.as_deref() == Some(ADMIN_ROLE))
    }

    /// Store credentials obtained from a login flow.
    pub async fn login(&self, token: &str, role: Option<&str>) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, token).await?;
        match role {
            Some(role) => self.store.set(ROLE_KEY, role).await,
            None => self.store.remove(ROLE_KEY).await,
        }
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(ROLE_KEY).await
    }

    async fn non_empty(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(key).await?.filter(|v| !v.is_empty()))
    }
}
