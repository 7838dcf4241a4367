//! Credential record store.
//!
//! [`UserStore`] abstracts user record persistence behind
//! `{find_by, add, update}`. Lookups that miss return an
//! `ErrorKind::NotFound` error rather than an `Option`, so the facade can
//! decide per call site whether a miss is an outcome or a failure.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use doorman_core::result::AppResult;
use doorman_entity::user::{User, UserPatch};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Which attribute a user lookup selects on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    /// Primary key.
    Id(Uuid),
    /// Unique email address.
    Email(String),
    /// Session identifier stored on the record.
    SessionId(String),
    /// Outstanding password-reset token.
    ResetToken(String),
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Attribute name only; token and session values never reach logs.
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Email(email) => write!(f, "email={email}"),
            Self::SessionId(_) => write!(f, "session_id"),
            Self::ResetToken(_) => write!(f, "reset_token"),
        }
    }
}

/// Trait for user record persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find the user matching a filter.
    ///
    /// Returns an `ErrorKind::NotFound` error when no record matches.
    async fn find_by(&self, filter: &UserFilter) -> AppResult<User>;

    /// Insert a new user with the given email and password digest.
    ///
    /// Returns an `ErrorKind::Conflict` error when the email is taken.
    async fn add(&self, email: &str, password_hash: &str) -> AppResult<User>;

    /// Apply a patch to the user with the given id.
    ///
    /// Returns an `ErrorKind::NotFound` error when the id is unknown.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> AppResult<()>;
}
