//! Session-backing capability trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::result::AppResult;

/// What a backing knows about one live session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionRecord {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
}

/// Trait for a session identifier → record mapping.
///
/// Implementations form a decorator stack: a plain in-memory registry, an
/// expiry decorator that hides stale records, and a durable decorator that
/// mirrors records into persistent storage. Every layer satisfies the same
/// contract, so any of them can be handed to the facade and the HTTP layer
/// as an `Arc<dyn SessionBacking>`.
#[async_trait]
pub trait SessionBacking: Send + Sync + 'static {
    /// Create a session for the given user.
    ///
    /// Returns `None` for a nil user id; otherwise the freshly generated,
    /// unguessable session identifier.
    async fn create(&self, user_id: Uuid) -> AppResult<Option<String>>;

    /// Look up the record for a session identifier.
    ///
    /// Returns `None` when the id is empty, unknown, or (in decorated
    /// layers) expired.
    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>>;

    /// Remove a session. Returns `false` when no such session existed.
    async fn destroy(&self, session_id: &str) -> AppResult<bool>;

    /// Project the record for a session identifier to its user id.
    async fn user_id_for(&self, session_id: &str) -> AppResult<Option<Uuid>> {
        Ok(self.get(session_id).await?.map(|record| record.user_id))
    }
}
