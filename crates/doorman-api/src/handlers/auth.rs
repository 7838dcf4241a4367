//! Auth handlers — register, login, logout, me, password reset.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use doorman_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest, ResetTokenRequest, UpdatePasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse, ResetTokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.auth.register_user(&req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    if !state.auth.valid_login(&req.email, &req.password).await? {
        return Err(AppError::unauthorized("invalid email or password").into());
    }

    let session_id = state
        .auth
        .create_session(&req.email)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid email or password"))?;

    let user = state
        .auth
        .user_from_session(&session_id)
        .await?
        .ok_or_else(|| AppError::internal("freshly created session did not resolve"))?;

    let cookie = Cookie::build((state.config.session.cookie_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Json(ApiResponse::ok(UserResponse::from(&user)))))
}

/// DELETE /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.auth.destroy_session(user.id).await?;

    let cookie = Cookie::build(state.config.session.cookie_name.clone())
        .path("/")
        .build();

    Ok((
        jar.remove(cookie),
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(&user.0)))
}

/// POST /api/auth/reset_password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetTokenRequest>,
) -> Result<Json<ApiResponse<ResetTokenResponse>>, ApiError> {
    let reset_token = state.auth.reset_password_token(&req.email).await?;
    Ok(Json(ApiResponse::ok(ResetTokenResponse {
        email: req.email,
        reset_token,
    })))
}

/// PUT /api/auth/reset_password
pub async fn update_password(
    State(state): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth
        .update_password(&req.reset_token, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password updated".to_string(),
    })))
}
