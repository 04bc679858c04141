use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use tracing::debug;

use crate::{RedisPool, SessionError, SessionId, UserId, SESSION_TTL_SECONDS};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return its id.
    async fn create(&self, user_id: &UserId) -> Result<SessionId, SessionError>;

    /// The user behind a session, or `None` once it expired or was destroyed.
    async fn user_id(&self, id: &SessionId) -> Result<Option<UserId>, SessionError>;

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError>;
}

pub struct RedisSessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: SESSION_TTL_SECONDS,
        }
    }

    fn key(id: &SessionId) -> String {
        format!("session:{}", id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: &UserId) -> Result<SessionId, SessionError> {
        let mut conn = self.pool.get().await?;
        let id = SessionId::generate();

        let _: () = conn
            .set_ex(Self::key(&id), user_id.as_str(), self.ttl_seconds)
            .await?;

        debug!(user_id = %user_id, "session created");
        Ok(id)
    }

    async fn user_id(&self, id: &SessionId) -> Result<Option<UserId>, SessionError> {
        let mut conn = self.pool.get().await?;
        let user_id: Option<String> = conn.get(Self::key(id)).await?;
        Ok(user_id.map(UserId::new))
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        let mut conn = self.pool.get().await?;
        let removed: i64 = conn.del(Self::key(id)).await?;
        debug!(removed, "session destroyed");
        Ok(())
    }
}
