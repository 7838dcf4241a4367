//! In-memory user store for tests and single-process setups.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use doorman_core::error::AppError;
use doorman_core::result::AppResult;
use doorman_entity::user::{User, UserPatch};

use super::{UserFilter, UserStore};

/// User store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(user: &User, filter: &UserFilter) -> bool {
    match filter {
        UserFilter::Id(id) => user.id == *id,
        UserFilter::Email(email) => user.email.eq_ignore_ascii_case(email),
        UserFilter::SessionId(sid) => user.session_id.as_deref() == Some(sid.as_str()),
        UserFilter::ResetToken(token) => user.reset_token.as_deref() == Some(token.as_str()),
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by(&self, filter: &UserFilter) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| matches(user, filter))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no user matching {filter}")))
    }

    async fn add(&self, email: &str, password_hash: &str) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::conflict(format!("User {email} already exists")));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("no user matching id={id}")))?;
        patch.apply(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorman_core::error::ErrorKind;

    #[tokio::test]
    async fn test_add_and_find_by_email() {
        let store = MemoryUserStore::new();
        let user = store.add("a@b.com", "digest").await.expect("insert");

        let found = store
            .find_by(&UserFilter::Email("A@B.COM".to_string()))
            .await
            .expect("lookup");
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.add("a@b.com", "digest").await.expect("insert");

        let err = store.add("a@b.com", "digest2").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_find_miss_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store
            .find_by(&UserFilter::SessionId("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store
            .update(Uuid::new_v4(), &UserPatch::session(None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_stores_session_id() {
        let store = MemoryUserStore::new();
        let user = store.add("a@b.com", "digest").await.expect("insert");

        store
            .update(user.id, &UserPatch::session(Some("sid-1".to_string())))
            .await
            .expect("update");

        let found = store
            .find_by(&UserFilter::SessionId("sid-1".to_string()))
            .await
            .expect("lookup by session");
        assert_eq!(found.id, user.id);
    }
}
