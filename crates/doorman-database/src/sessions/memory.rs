//! In-memory durable session record store for tests and single-process
//! setups.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use doorman_core::result::AppResult;
use doorman_entity::session::UserSession;

use super::UserSessionStore;

/// Session record store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryUserSessionStore {
    sessions: RwLock<HashMap<String, UserSession>>,
}

impl MemoryUserSessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserSessionStore for MemoryUserSessionStore {
    async fn insert(&self, session: &UserSession) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session.session_id.clone())
            .or_insert_with(|| session.clone());
        Ok(())
    }

    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<UserSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(session_id).is_some())
    }

    async fn all(&self) -> AppResult<Vec<UserSession>> {
        let sessions = self.sessions.read().await;
        let mut records: Vec<_> = sessions.values().cloned().collect();
        records.sort_by_key(|s| s.created_at);
        Ok(records)
    }
}
