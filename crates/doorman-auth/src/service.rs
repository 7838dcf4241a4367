//! The authentication facade.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use doorman_core::config::auth::AuthConfig;
use doorman_core::error::{AppError, ErrorKind};
use doorman_core::result::AppResult;
use doorman_core::traits::SessionBacking;
use doorman_database::users::{UserFilter, UserStore};
use doorman_entity::user::{User, UserPatch};

use crate::password::PasswordHasher;

/// Orchestrates registration, login, session issuance, and password-reset
/// flows over the injected stores.
///
/// Storage-layer `NotFound` errors stop here: each operation translates a
/// miss into its own outcome (a `false`, a `None`, or a domain error) so
/// callers never see a raw storage failure.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionBacking>,
    hasher: Arc<PasswordHasher>,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new service over the given stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionBacking>,
        hasher: Arc<PasswordHasher>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            config,
        }
    }

    /// Register a new user.
    ///
    /// Fails with `ErrorKind::Conflict` when the email is already taken
    /// and `ErrorKind::Validation` when the password is too short.
    pub async fn register_user(&self, email: &str, password: &str) -> AppResult<User> {
        if email.is_empty() {
            return Err(AppError::validation("email must not be empty"));
        }
        if password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        if self.find_user(&UserFilter::Email(email.to_string())).await?.is_some() {
            return Err(AppError::conflict(format!("User {email} already exists")));
        }

        let digest = self.hasher.hash_password(password)?;
        let user = self.users.add(email, &digest).await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Whether the email/password pair checks out. Unknown emails are a
    /// plain `false`, indistinguishable from a wrong password.
    pub async fn valid_login(&self, email: &str, password: &str) -> AppResult<bool> {
        match self.find_user(&UserFilter::Email(email.to_string())).await? {
            Some(user) => self.hasher.verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }

    /// Open a session for the user with the given email.
    ///
    /// The identifier comes from the session backing and is also mirrored
    /// onto the user record's `session_id` column. Returns `None` when no
    /// such user exists.
    pub async fn create_session(&self, email: &str) -> AppResult<Option<String>> {
        let Some(user) = self.find_user(&UserFilter::Email(email.to_string())).await? else {
            return Ok(None);
        };

        let Some(session_id) = self.sessions.create(user.id).await? else {
            warn!(user_id = %user.id, "Session backing refused to issue an id");
            return Ok(None);
        };

        self.users
            .update(user.id, &UserPatch::session(Some(session_id.clone())))
            .await?;
        info!(user_id = %user.id, "Session created");
        Ok(Some(session_id))
    }

    /// Resolve a session identifier to the user logged in under it.
    ///
    /// `None` when the identifier is empty, the backing does not resolve
    /// it (unknown or expired), or no user record carries it any more.
    pub async fn user_from_session(&self, session_id: &str) -> AppResult<Option<User>> {
        if session_id.is_empty() {
            return Ok(None);
        }

        if self.sessions.user_id_for(session_id).await?.is_none() {
            return Ok(None);
        }

        self.find_user(&UserFilter::SessionId(session_id.to_string()))
            .await
    }

    /// Log the user out: drop the backing entry and clear the record's
    /// `session_id` column.
    pub async fn destroy_session(&self, user_id: Uuid) -> AppResult<()> {
        let user = self.users.find_by(&UserFilter::Id(user_id)).await?;

        if let Some(session_id) = &user.session_id {
            self.sessions.destroy(session_id).await?;
        }
        self.users.update(user.id, &UserPatch::session(None)).await?;
        info!(%user_id, "Session destroyed");
        Ok(())
    }

    /// Issue a password-reset token for the given email, overwriting any
    /// previous one. Fails with `ErrorKind::NotFound` for unknown emails.
    pub async fn reset_password_token(&self, email: &str) -> AppResult<String> {
        let user = self
            .find_user(&UserFilter::Email(email.to_string()))
            .await?
            .ok_or_else(|| AppError::not_found("no user registered for that email"))?;

        let token = Uuid::new_v4().to_string();
        self.users
            .update(user.id, &UserPatch::reset_token(Some(token.clone())))
            .await?;
        info!(user_id = %user.id, "Reset token issued");
        Ok(token)
    }

    /// Consume a reset token: store the new password digest and clear the
    /// token. Fails with `ErrorKind::Unauthorized` when the token matches
    /// no user.
    pub async fn update_password(&self, reset_token: &str, new_password: &str) -> AppResult<()> {
        if reset_token.is_empty() {
            return Err(AppError::unauthorized("invalid reset token"));
        }
        if new_password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let user = self
            .find_user(&UserFilter::ResetToken(reset_token.to_string()))
            .await?
            .ok_or_else(|| AppError::unauthorized("invalid reset token"))?;

        let digest = self.hasher.hash_password(new_password)?;
        self.users
            .update(user.id, &UserPatch::rotated_password(digest))
            .await?;
        info!(user_id = %user.id, "Password updated via reset token");
        Ok(())
    }

    /// Lookup translating the store's NotFound into `None`.
    async fn find_user(&self, filter: &UserFilter) -> AppResult<Option<User>> {
        match self.users.find_by(filter).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_kind(ErrorKind::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
