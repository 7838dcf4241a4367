//! In-memory session registry.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use doorman_core::result::AppResult;
use doorman_core::traits::{SessionBacking, SessionRecord};

/// The raw session identifier → record mapping.
///
/// Pure bookkeeping: no expiration logic lives here. Constructed once at
/// service start and injected wherever a backing is needed; the sharded
/// map keeps concurrent create/destroy on distinct ids lock-free.
#[derive(Debug, Default)]
pub struct MemorySessionRegistry {
    sessions: DashMap<String, SessionRecord>,
}

impl MemorySessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionBacking for MemorySessionRegistry {
    async fn create(&self, user_id: Uuid) -> AppResult<Option<String>> {
        if user_id.is_nil() {
            return Ok(None);
        }

        // v4 UUIDs come from the OS CSPRNG: 122 random bits, never
        // sequential, collision-free for any realistic session count.
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            SessionRecord {
                user_id,
                created_at: Utc::now(),
            },
        );
        debug!(%user_id, "Session registered");
        Ok(Some(session_id))
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>> {
        if session_id.is_empty() {
            return Ok(None);
        }
        Ok(self.sessions.get(session_id).map(|entry| entry.value().clone()))
    }

    async fn destroy(&self, session_id: &str) -> AppResult<bool> {
        Ok(self.sessions.remove(session_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_lookup() {
        let registry = MemorySessionRegistry::new();
        let user_id = Uuid::new_v4();

        let sid = registry
            .create(user_id)
            .await
            .expect("create")
            .expect("session id");
        assert_eq!(
            registry.user_id_for(&sid).await.expect("lookup"),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn test_nil_user_is_rejected() {
        let registry = MemorySessionRegistry::new();
        assert_eq!(registry.create(Uuid::nil()).await.expect("create"), None);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let registry = MemorySessionRegistry::new();
        let user_id = Uuid::new_v4();
        let a = registry.create(user_id).await.expect("create").unwrap();
        let b = registry.create(user_id).await.expect("create").unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_and_unknown_ids_miss() {
        let registry = MemorySessionRegistry::new();
        assert_eq!(registry.user_id_for("").await.expect("lookup"), None);
        assert_eq!(
            registry.user_id_for("never-issued").await.expect("lookup"),
            None
        );
    }

    #[tokio::test]
    async fn test_destroy_semantics() {
        let registry = MemorySessionRegistry::new();
        let sid = registry
            .create(Uuid::new_v4())
            .await
            .expect("create")
            .unwrap();

        assert!(!registry.destroy("unknown").await.expect("destroy"));
        assert!(registry.destroy(&sid).await.expect("destroy"));
        assert!(!registry.destroy(&sid).await.expect("destroy again"));
        assert_eq!(registry.user_id_for(&sid).await.expect("lookup"), None);
    }
}
