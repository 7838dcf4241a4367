//! Durable decorator over a session backing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use doorman_core::result::AppResult;
use doorman_core::traits::{SessionBacking, SessionRecord};
use doorman_database::sessions::UserSessionStore;
use doorman_entity::session::UserSession;

use super::expiry::session_expired;
use super::snapshot::SnapshotFile;

/// Decorator mirroring sessions into durable storage.
///
/// Wraps the expiry-decorated stack: creates flow inward first so the
/// identifier comes from the registry, then a [`UserSession`] record is
/// persisted and the snapshot rewritten. Lookups consult the durable
/// store, which is authoritative — a restart loses the in-memory layer
/// but not the records, and [`DurableSessionStore::open`] replays the
/// snapshot for anything the durable store itself lost.
pub struct DurableSessionStore {
    inner: Arc<dyn SessionBacking>,
    records: Arc<dyn UserSessionStore>,
    snapshot: SnapshotFile,
    duration_seconds: u64,
}

impl DurableSessionStore {
    /// Open the durable store, replaying the snapshot once.
    ///
    /// Snapshot recovery happens here at process start, never per lookup:
    /// records present in the snapshot but missing from the durable store
    /// are re-inserted.
    pub async fn open(
        inner: Arc<dyn SessionBacking>,
        records: Arc<dyn UserSessionStore>,
        snapshot_path: &str,
        duration_seconds: u64,
    ) -> AppResult<Self> {
        let snapshot = SnapshotFile::new(snapshot_path);
        let mut recovered = 0usize;

        for session in snapshot.load().await? {
            if records
                .find_by_session_id(&session.session_id)
                .await?
                .is_none()
            {
                records.insert(&session).await?;
                recovered += 1;
            }
        }

        if recovered > 0 {
            info!(recovered, "Recovered session records from snapshot");
        }

        Ok(Self {
            inner,
            records,
            snapshot,
            duration_seconds,
        })
    }

    async fn write_snapshot(&self) -> AppResult<()> {
        let all = self.records.all().await?;
        self.snapshot.write(&all).await
    }
}

#[async_trait]
impl SessionBacking for DurableSessionStore {
    async fn create(&self, user_id: Uuid) -> AppResult<Option<String>> {
        let Some(session_id) = self.inner.create(user_id).await? else {
            return Ok(None);
        };

        // Share the registry's creation stamp so both layers agree on the
        // expiry instant.
        let created_at = self
            .inner
            .get(&session_id)
            .await?
            .map(|r| r.created_at)
            .unwrap_or_else(Utc::now);

        let record = UserSession {
            user_id,
            session_id: session_id.clone(),
            created_at,
        };
        self.records.insert(&record).await?;
        self.write_snapshot().await?;

        Ok(Some(session_id))
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>> {
        if session_id.is_empty() {
            return Ok(None);
        }

        let Some(record) = self.records.find_by_session_id(session_id).await? else {
            return Ok(None);
        };

        if session_expired(record.created_at, self.duration_seconds, Utc::now()) {
            return Ok(None);
        }

        Ok(Some(SessionRecord {
            user_id: record.user_id,
            created_at: record.created_at,
        }))
    }

    async fn destroy(&self, session_id: &str) -> AppResult<bool> {
        if !self.records.remove(session_id).await? {
            return Ok(false);
        }
        self.write_snapshot().await?;

        if !self.inner.destroy(session_id).await? {
            // Normal after a restart: the durable record survived, the
            // in-memory entry did not.
            warn!("Destroyed a durable session with no in-memory entry");
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::expiry::ExpiringSessionStore;
    use crate::session::registry::MemorySessionRegistry;
    use chrono::Duration;
    use doorman_database::sessions::MemoryUserSessionStore;
    use std::path::PathBuf;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("doorman-durable-{tag}-{}.json", Uuid::new_v4()))
    }

    async fn open_store(
        records: Arc<MemoryUserSessionStore>,
        path: &PathBuf,
        duration_seconds: u64,
    ) -> DurableSessionStore {
        let registry = Arc::new(MemorySessionRegistry::new());
        let expiring = Arc::new(ExpiringSessionStore::new(registry, duration_seconds));
        DurableSessionStore::open(
            expiring,
            records,
            path.to_str().expect("utf-8 path"),
            duration_seconds,
        )
        .await
        .expect("open")
    }

    #[tokio::test]
    async fn test_create_persists_record_and_snapshot() {
        let path = scratch_path("create");
        let records = Arc::new(MemoryUserSessionStore::new());
        let store = open_store(records.clone(), &path, 0).await;

        let user_id = Uuid::new_v4();
        let sid = store.create(user_id).await.expect("create").unwrap();

        let record = records
            .find_by_session_id(&sid)
            .await
            .expect("find")
            .expect("persisted");
        assert_eq!(record.user_id, user_id);

        let snapshot = SnapshotFile::new(&path).load().await.expect("snapshot");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].session_id, sid);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_lookup_survives_registry_loss() {
        // Simulates a restart: a fresh registry, a fresh durable store,
        // only the snapshot file carries the session across.
        let path = scratch_path("recovery");
        let old_records = Arc::new(MemoryUserSessionStore::new());
        let store = open_store(old_records, &path, 0).await;

        let user_id = Uuid::new_v4();
        let sid = store.create(user_id).await.expect("create").unwrap();
        drop(store);

        let new_records = Arc::new(MemoryUserSessionStore::new());
        let reopened = open_store(new_records, &path, 0).await;
        assert_eq!(
            reopened.user_id_for(&sid).await.expect("lookup"),
            Some(user_id)
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_expiry_applies_to_durable_records() {
        let path = scratch_path("expiry");
        let records = Arc::new(MemoryUserSessionStore::new());
        let store = open_store(records.clone(), &path, 1).await;

        // Backdate a record past the 1-second lifetime.
        let stale = UserSession {
            user_id: Uuid::new_v4(),
            session_id: "stale-sid".to_string(),
            created_at: Utc::now() - Duration::seconds(5),
        };
        records.insert(&stale).await.expect("insert");

        assert_eq!(store.user_id_for("stale-sid").await.expect("lookup"), None);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_destroy_removes_record_and_reports_absence() {
        let path = scratch_path("destroy");
        let records = Arc::new(MemoryUserSessionStore::new());
        let store = open_store(records.clone(), &path, 0).await;

        let sid = store
            .create(Uuid::new_v4())
            .await
            .expect("create")
            .unwrap();

        assert!(!store.destroy("unknown-sid").await.expect("destroy"));
        assert!(store.destroy(&sid).await.expect("destroy"));
        assert!(!store.destroy(&sid).await.expect("destroy again"));
        assert_eq!(store.user_id_for(&sid).await.expect("lookup"), None);

        let snapshot = SnapshotFile::new(&path).load().await.expect("snapshot");
        assert!(snapshot.is_empty());

        let _ = tokio::fs::remove_file(&path).await;
    }
}
