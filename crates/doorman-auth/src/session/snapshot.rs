//! JSON snapshot file for durable session records.

use std::path::{Path, PathBuf};

use tracing::debug;

use doorman_core::result::AppResult;
use doorman_entity::session::UserSession;

/// Reads and writes the session snapshot used for crash recovery.
///
/// Writes go to a sibling temp file first and are moved into place with a
/// rename, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a handle for the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records from the snapshot. A missing file is an empty
    /// snapshot, not an error.
    pub async fn load(&self) -> AppResult<Vec<UserSession>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let sessions: Vec<UserSession> = serde_json::from_slice(&bytes)?;
                debug!(path = %self.path.display(), count = sessions.len(), "Snapshot loaded");
                Ok(sessions)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the snapshot with the given records.
    pub async fn write(&self, sessions: &[UserSession]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(sessions)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), count = sessions.len(), "Snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("doorman-snapshot-{tag}-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let snapshot = SnapshotFile::new(scratch_path("missing"));
        assert!(snapshot.load().await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn test_write_then_load_round_trip() {
        let path = scratch_path("roundtrip");
        let snapshot = SnapshotFile::new(&path);
        let records = vec![
            UserSession::new(Uuid::new_v4(), "sid-1"),
            UserSession::new(Uuid::new_v4(), "sid-2"),
        ];

        snapshot.write(&records).await.expect("write");
        let loaded = snapshot.load().await.expect("load");
        assert_eq!(loaded, records);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_write_replaces_previous_contents() {
        let path = scratch_path("replace");
        let snapshot = SnapshotFile::new(&path);

        snapshot
            .write(&[UserSession::new(Uuid::new_v4(), "old")])
            .await
            .expect("first write");
        snapshot.write(&[]).await.expect("second write");

        assert!(snapshot.load().await.expect("load").is_empty());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
