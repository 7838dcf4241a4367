//! `CurrentUser` extractor — resolves the session cookie, falling back to
//! a Basic auth header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use doorman_core::error::AppError;
use doorman_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user for a request.
///
/// Resolution order matches the credential the client chose to send: a
/// session cookie (under the configured cookie name) wins; otherwise an
/// `Authorization: Basic` header is verified statelessly. A present but
/// unresolvable cookie is `403` — the caller had a session and lost it —
/// while absent or bad credentials are `401`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
            let user = state.auth.user_from_session(cookie.value()).await?;
            return user
                .map(CurrentUser)
                .ok_or_else(|| AppError::forbidden("session is expired or unknown").into());
        }

        if let Some(header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        {
            if let Some(user) = state.basic.authenticate(header).await? {
                return Ok(CurrentUser(user));
            }
            return Err(AppError::unauthorized("invalid credentials").into());
        }

        Err(AppError::unauthorized("authentication required").into())
    }
}
