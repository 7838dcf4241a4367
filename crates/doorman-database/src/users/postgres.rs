//! Postgres-backed user store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use doorman_core::error::{AppError, ErrorKind};
use doorman_core::result::AppResult;
use doorman_entity::user::{User, UserPatch};

use super::{UserFilter, UserStore};

/// User store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new Postgres user store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, filter: &UserFilter) -> AppResult<Option<User>> {
        let query = match filter {
            UserFilter::Id(_) => "SELECT * FROM users WHERE id = $1",
            UserFilter::Email(_) => "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
            UserFilter::SessionId(_) => "SELECT * FROM users WHERE session_id = $1",
            UserFilter::ResetToken(_) => "SELECT * FROM users WHERE reset_token = $1",
        };

        let result = match filter {
            UserFilter::Id(id) => {
                sqlx::query_as::<_, User>(query)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
            UserFilter::Email(value)
            | UserFilter::SessionId(value)
            | UserFilter::ResetToken(value) => {
                sqlx::query_as::<_, User>(query)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await
            }
        };

        result.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by(&self, filter: &UserFilter) -> AppResult<User> {
        self.fetch(filter)
            .await?
            .ok_or_else(|| AppError::not_found(format!("no user matching {filter}")))
    }

    async fn add(&self, email: &str, password_hash: &str) -> AppResult<User> {
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

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, session_id, reset_token, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.session_id)
        .bind(&user.reset_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!("User {email} already exists"))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert user", e)
            }
        })?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> AppResult<()> {
        // Read-merge-write: the patch is applied in Rust and the full set of
        // mutable columns is written back in one statement.
        let mut user = self.find_by(&UserFilter::Id(id)).await?;
        patch.apply(&mut user);

        let result = sqlx::query(
            "UPDATE users SET email = $2, password_hash = $3, session_id = $4, \
             reset_token = $5, updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.session_id)
        .bind(&user.reset_token)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("no user matching id={id}")));
        }
        Ok(())
    }
}

/// Whether a sqlx error is a Postgres unique-constraint violation (23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
