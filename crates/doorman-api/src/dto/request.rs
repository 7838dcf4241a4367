//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /api/auth/reset_password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTokenRequest {
    /// Email address of the account to reset.
    pub email: String,
}

/// Body of `PUT /api/auth/reset_password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    /// Token issued by `POST /api/auth/reset_password`.
    pub reset_token: String,
    /// New plaintext password.
    pub new_password: String,
}
