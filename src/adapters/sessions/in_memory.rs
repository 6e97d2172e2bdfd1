//! In-memory session store for testing and single-process development.
//!
//! Sessions are lost on restart and are not shared between processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, Timestamp, UserId};
use crate::ports::{SessionStore, SessionToken};

use super::token;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: UserId,
    expires_at: Timestamp,
}

/// In-memory session store keyed by token digest.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored sessions, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired sessions.
    pub async fn purge_expired(&self) {
        let now = Timestamp::now();
        self.sessions
            .write()
            .await
            .retain(|_, entry| entry.expires_at.is_after(&now));
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn open(&self, user_id: &UserId) -> Result<SessionToken, AuthError> {
        let token = token::generate();
        let entry = SessionEntry {
            user_id: *user_id,
            expires_at: Timestamp::now().plus_secs(self.ttl.as_secs()),
        };
        self.sessions
            .write()
            .await
            .insert(token::digest(&token), entry);
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, AuthError> {
        let key = token::digest(token);
        let now = Timestamp::now();

        let entry = self.sessions.read().await.get(&key).copied();
        match entry {
            Some(entry) if entry.expires_at.is_after(&now) => Ok(Some(entry.user_id)),
            Some(_) => {
                self.sessions.write().await.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.write().await.remove(&token::digest(token));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemorySessionStore {
        InMemorySessionStore::new(Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn open_then_resolve_returns_user() {
        let store = store();
        let user_id = UserId::new();

        let token = store.open(&user_id).await.unwrap();

        assert_eq!(store.resolve(&token).await.unwrap(), Some(user_id));
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let store = store();
        let result = store.resolve(&SessionToken::new("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn revoked_token_no_longer_resolves() {
        let store = store();
        let token = store.open(&UserId::new()).await.unwrap();

        store.revoke(&token).await.unwrap();

        assert!(store.resolve(&token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let store = store();
        let token = SessionToken::new("never-opened");
        assert!(store.revoke(&token).await.is_ok());
        assert!(store.revoke(&token).await.is_ok());
    }

    #[tokio::test]
    async fn expired_session_does_not_resolve() {
        let store = InMemorySessionStore::new(Duration::from_secs(0));
        let token = store.open(&UserId::new()).await.unwrap();

        assert!(store.resolve(&token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let expired = InMemorySessionStore::new(Duration::from_secs(0));
        expired.open(&UserId::new()).await.unwrap();
        expired.purge_expired().await;
        assert!(expired.is_empty().await);

        let live = store();
        live.open(&UserId::new()).await.unwrap();
        live.purge_expired().await;
        assert_eq!(live.len().await, 1);
    }

    #[tokio::test]
    async fn raw_token_is_not_used_as_key() {
        let store = store();
        let token = store.open(&UserId::new()).await.unwrap();
        assert!(!store.sessions.read().await.contains_key(token.as_str()));
    }
}
