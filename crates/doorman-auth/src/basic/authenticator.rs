//! Resolves Basic credentials to user records.

use std::sync::Arc;

use tracing::debug;

use doorman_core::error::ErrorKind;
use doorman_core::result::AppResult;
use doorman_database::users::{UserFilter, UserStore};
use doorman_entity::user::User;

use crate::password::PasswordHasher;

use super::credentials::extract_credentials;

/// Stateless authenticator for `Authorization: Basic` requests.
///
/// No session is involved: every request carries the full credentials and
/// is verified against the stored digest.
pub struct BasicAuthenticator {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl BasicAuthenticator {
    /// Create a new authenticator.
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Resolve an email/password pair to the user it authenticates.
    ///
    /// Returns `None` for empty inputs, an unknown email, or a digest
    /// mismatch.
    pub async fn resolve_user(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let user = match self.users.find_by(&UserFilter::Email(email.to_string())).await {
            Ok(user) => user,
            Err(e) if e.is_kind(ErrorKind::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        if self.hasher.verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            debug!(%email, "Basic auth digest mismatch");
            Ok(None)
        }
    }

    /// Authenticate a raw `Authorization` header value.
    pub async fn authenticate(&self, header: &str) -> AppResult<Option<User>> {
        let Some(creds) = extract_credentials(header) else {
            return Ok(None);
        };
        self.resolve_user(&creds.email, &creds.password).await
    }
}
