//! Durable session record store.
//!
//! Persists [`UserSession`] records so live sessions survive a process
//! restart. The durable session decorator in `doorman-auth` queries this
//! store on every lookup and keeps the JSON snapshot in sync with it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use doorman_core::result::AppResult;
use doorman_entity::session::UserSession;

pub use memory::MemoryUserSessionStore;
pub use postgres::PgUserSessionStore;

/// Trait for durable session record persistence.
#[async_trait]
pub trait UserSessionStore: Send + Sync + 'static {
    /// Insert a session record. Re-inserting an existing session id is a
    /// no-op (used during snapshot replay).
    async fn insert(&self, session: &UserSession) -> AppResult<()>;

    /// Find a record by its session identifier.
    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<UserSession>>;

    /// Delete a record. Returns `false` when no record existed.
    async fn remove(&self, session_id: &str) -> AppResult<bool>;

    /// All stored records, for snapshot writes.
    async fn all(&self) -> AppResult<Vec<UserSession>>;
}
