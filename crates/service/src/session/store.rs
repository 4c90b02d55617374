use async_trait::async_trait;
use models::Session;
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Supplies the bearer token for authenticated calls.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// Token store that can also hold the whole session.
#[async_trait]
pub trait SessionStore: TokenStore {
    async fn session(&self) -> Option<Session>;
    async fn save(&self, session: Session) -> Result<(), ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}

pub(crate) fn token_of(session: Option<&Session>) -> Option<String> {
    session.map(|s| s.token.clone()).filter(|t| !t.is_empty())
}

/// A fixed token, e.g. passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenStore for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}

/// Session kept for the lifetime of the process.
///
/// # Examples
/// ```
/// use service::session::{InMemorySessionStore, SessionStore, TokenStore};
/// let store = InMemorySessionStore::new();
/// let session = models::Session { username: "ana".into(), token: "t0k".into(), role: "ADMIN".into() };
/// tokio_test::block_on(store.save(session)).unwrap();
/// assert_eq!(tokio_test::block_on(store.token()).as_deref(), Some("t0k"));
/// ```
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { inner: RwLock::new(Some(session)) }
    }
}

#[async_trait]
impl TokenStore for InMemorySessionStore {
    async fn token(&self) -> Option<String> {
        token_of(self.inner.read().await.as_ref())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    async fn save(&self, session: Session) -> Result<(), ServiceError> {
        *self.inner.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        *self.inner.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session { username: "ana".into(), token: token.into(), role: "ADMIN".into() }
    }

    #[tokio::test]
    async fn in_memory_store_round_trips_session() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.token().await, None);

        store.save(session("t1")).await.unwrap();
        assert_eq!(store.token().await.as_deref(), Some("t1"));
        assert_eq!(store.session().await.unwrap().role, "ADMIN");

        store.clear().await.unwrap();
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn empty_token_counts_as_missing() {
        let store = InMemorySessionStore::with_session(session(""));
        assert_eq!(store.token().await, None);
        assert_eq!(StaticToken(String::new()).token().await, None);
    }
}
