//! Redis-backed session store for production deployments.
//!
//! Each session is one key `session:{sha256(token)}` holding the user ID,
//! with a Redis TTL so expiry needs no sweeping.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::{AuthError, UserId};
use crate::ports::{SessionStore, SessionToken};

use super::token;

const KEY_PREFIX: &str = "session:";

/// Redis session store. Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    fn key(token: &SessionToken) -> String {
        format!("{}{}", KEY_PREFIX, token::digest(token))
    }
}

fn unavailable(e: redis::RedisError) -> AuthError {
    AuthError::service_unavailable(format!("session store: {}", e))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn open(&self, user_id: &UserId) -> Result<SessionToken, AuthError> {
        let token = token::generate();
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(Self::key(&token))
            .arg(user_id.to_string())
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, AuthError> {
        let mut conn = self.conn.clone();

        let stored: Option<String> = conn.get(Self::key(token)).await.map_err(unavailable)?;

        match stored {
            Some(raw) => match raw.parse::<UserId>() {
                Ok(user_id) => Ok(Some(user_id)),
                Err(_) => {
                    tracing::warn!("discarding session with malformed user id");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(token))
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
