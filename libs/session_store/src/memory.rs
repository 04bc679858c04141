//! In-memory [`SessionStore`] used by tests in place of Redis.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::store::SessionStore;
use crate::{SessionError, SessionId, UserId};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, UserId>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, UserId>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::Config("session store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: &UserId) -> Result<SessionId, SessionError> {
        let id = SessionId::generate();
        self.lock()?.insert(id.clone(), user_id.clone());
        Ok(id)
    }

    async fn user_id(&self, id: &SessionId) -> Result<Option<UserId>, SessionError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        self.lock()?.remove(id);
        Ok(())
    }
}
