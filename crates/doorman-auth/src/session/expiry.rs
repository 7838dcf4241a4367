//! Expiry decorator over a session backing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use doorman_core::result::AppResult;
use doorman_core::traits::{SessionBacking, SessionRecord};

/// Whether a session created at `created_at` is past its lifetime at `now`.
///
/// A duration of `0` means sessions never expire. The durable decorator
/// applies this same comparison to its persisted records, so the two
/// layers can never disagree on what "expired" means.
pub fn session_expired(created_at: DateTime<Utc>, duration_seconds: u64, now: DateTime<Utc>) -> bool {
    if duration_seconds == 0 {
        return false;
    }
    created_at + Duration::seconds(duration_seconds as i64) < now
}

/// Decorator adding a lifetime to every session of the wrapped backing.
///
/// Expiry is checked lazily on lookup; there is no background sweep. An
/// expired entry simply stops resolving, exactly as if it had been
/// destroyed.
pub struct ExpiringSessionStore {
    inner: Arc<dyn SessionBacking>,
    duration_seconds: u64,
}

impl ExpiringSessionStore {
    /// Wrap a backing with the given lifetime (seconds; `0` = never).
    pub fn new(inner: Arc<dyn SessionBacking>, duration_seconds: u64) -> Self {
        Self {
            inner,
            duration_seconds,
        }
    }

    /// The configured lifetime in seconds.
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }
}

#[async_trait]
impl SessionBacking for ExpiringSessionStore {
    async fn create(&self, user_id: Uuid) -> AppResult<Option<String>> {
        self.inner.create(user_id).await
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>> {
        let record = self.inner.get(session_id).await?;
        Ok(record.filter(|r| !session_expired(r.created_at, self.duration_seconds, Utc::now())))
    }

    async fn destroy(&self, session_id: &str) -> AppResult<bool> {
        self.inner.destroy(session_id).await
    }
}
