//! Durable session record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A session record mirrored into durable storage.
///
/// One row per live session; rows are deleted on logout and ignored once
/// past the configured lifetime. The same records are written to the JSON
/// snapshot file for crash recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Opaque session identifier (the cookie value).
    pub session_id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    /// Create a record stamped with the current time.
    pub fn new(user_id: Uuid, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            session_id: session_id.into(),
            created_at: Utc::now(),
        }
    }
}
