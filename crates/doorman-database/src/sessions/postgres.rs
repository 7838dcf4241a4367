//! Postgres-backed durable session record store.

use async_trait::async_trait;
use sqlx::PgPool;

use doorman_core::error::{AppError, ErrorKind};
use doorman_core::result::AppResult;
use doorman_entity::session::UserSession;

use super::UserSessionStore;

/// Durable session records over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserSessionStore {
    pool: PgPool,
}

impl PgUserSessionStore {
    /// Create a new Postgres session record store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSessionStore for PgUserSessionStore {
    async fn insert(&self, session: &UserSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_sessions (session_id, user_id, created_at) \
             VALUES ($1, $2, $3) ON CONFLICT (session_id) DO NOTHING",
        )
        .bind(&session.session_id)
        .bind(session.user_id)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert session record", e)
        })?;
        Ok(())
    }

    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<UserSession>> {
        sqlx::query_as::<_, UserSession>("SELECT * FROM user_sessions WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session record", e)
            })
    }

    async fn remove(&self, session_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session record", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn all(&self) -> AppResult<Vec<UserSession>> {
        sqlx::query_as::<_, UserSession>("SELECT * FROM user_sessions ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list session records", e)
            })
    }
}
