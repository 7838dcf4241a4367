//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use doorman_core::error::AppError;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique, the login name).
    pub email: String,
    /// Argon2 password digest.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Identifier of the user's current session, if logged in.
    pub session_id: Option<String>,
    /// Outstanding password-reset token, if one was issued.
    pub reset_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the user currently carries a live session identifier.
    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }
}

/// A set of staged changes to a user record.
///
/// Outer `Option` means "leave unchanged"; the inner `Option` on nullable
/// columns distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New email address.
    pub email: Option<String>,
    /// New password digest.
    pub password_hash: Option<String>,
    /// Set or clear the session identifier.
    pub session_id: Option<Option<String>>,
    /// Set or clear the reset token.
    pub reset_token: Option<Option<String>>,
}

/// Attribute names a patch may address. Anything else is rejected.
const PATCHABLE_FIELDS: [&str; 4] = ["email", "password_hash", "session_id", "reset_token"];

impl UserPatch {
    /// Patch that stores a session identifier on the user (or clears it).
    pub fn session(session_id: Option<String>) -> Self {
        Self {
            session_id: Some(session_id),
            ..Self::default()
        }
    }

    /// Patch that stores a reset token on the user (or clears it).
    pub fn reset_token(reset_token: Option<String>) -> Self {
        Self {
            reset_token: Some(reset_token),
            ..Self::default()
        }
    }

    /// Patch that rotates the password digest and invalidates any
    /// outstanding reset token.
    pub fn rotated_password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            reset_token: Some(None),
            ..Self::default()
        }
    }

    /// Build a patch from untyped field names, as arriving from a request
    /// body.
    ///
    /// Every key is checked against the known attribute set before any
    /// field is staged: one unknown key rejects the whole map, so a patch
    /// is either fully valid or never applied.
    pub fn from_fields(fields: &serde_json::Map<String, serde_json::Value>) -> Result<Self, AppError> {
        if let Some(unknown) = fields.keys().find(|k| !PATCHABLE_FIELDS.contains(&k.as_str())) {
            return Err(AppError::validation(format!(
                "unknown user field: {unknown}"
            )));
        }

        let mut patch = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "email" => patch.email = Some(required_string(key, value)?),
                "password_hash" => patch.password_hash = Some(required_string(key, value)?),
                "session_id" => patch.session_id = Some(nullable_string(key, value)?),
                "reset_token" => patch.reset_token = Some(nullable_string(key, value)?),
                _ => unreachable!("keys validated above"),
            }
        }
        Ok(patch)
    }

    /// Whether the patch stages no changes at all.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.session_id.is_none()
            && self.reset_token.is_none()
    }

    /// Apply the staged changes to a user record in place.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(session_id) = &self.session_id {
            user.session_id = session_id.clone();
        }
        if let Some(reset_token) = &self.reset_token {
            user.reset_token = reset_token.clone();
        }
        user.updated_at = Utc::now();
    }
}

fn required_string(key: &str, value: &serde_json::Value) -> Result<String, AppError> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| AppError::validation(format!("field {key} must be a string")))
}

fn nullable_string(key: &str, value: &serde_json::Value) -> Result<Option<String>, AppError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.clone())),
        _ => Err(AppError::validation(format!(
            "field {key} must be a string or null"
        ))),
    }
}
