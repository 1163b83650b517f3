//! Handlers for authentication endpoints.

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use validator::Validate;

use crate::api::dto::auth::{
    AccessTokenResponse, LoginRequest, OAuthCallbackParams, RefreshTokenRequest,
    RequestResetRequest, ResetPasswordRequest, SetPasswordRequest, SignupRequest,
    TokenPairResponse, VerifyOtpRequest,
};
use crate::api::dto::common::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and emails a verification OTP.
///
/// # Endpoint
///
/// `POST /api/auth/signup`
///
/// # Errors
///
/// Returns 409 when the email is already registered.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .signup(&payload.email, &payload.password)
        .await?;

    Ok(Json(MessageResponse::new("OTP sent to email")))
}

/// Verifies a signup OTP and issues the first token pair.
///
/// # Endpoint
///
/// `POST /api/auth/verify`
pub async fn verify_otp_handler(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate()?;

    let pair = state
        .auth_service
        .verify_otp(&payload.email, &payload.otp)
        .await?;

    Ok(Json(pair.into()))
}

/// Authenticates email + password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 on invalid credentials.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate()?;

    let pair = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(pair.into()))
}

/// Emails a password-reset OTP.
///
/// # Endpoint
///
/// `POST /api/auth/request-reset`
pub async fn request_reset_handler(
    State(state): State<AppState>,
    Json(payload): Json<RequestResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;

    Ok(Json(MessageResponse::new("OTP sent to your email")))
}

/// Completes a password reset after OTP verification.
///
/// # Endpoint
///
/// `POST /api/auth/reset-password`
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .reset_password(&payload.email, &payload.otp, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Sets a first password on an OAuth-created account.
///
/// # Endpoint
///
/// `POST /api/auth/set-password`
pub async fn set_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .set_password(&payload.email, &payload.password)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password set successfully. You can now log in using email and password.",
    )))
}

/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// `POST /api/auth/refresh-token`
///
/// # Errors
///
/// Returns 403 on a missing, expired, or rotated-out refresh token.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    payload.validate()?;

    let access_token = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// Redirects to the OAuth provider's consent screen.
///
/// # Endpoint
///
/// `GET /api/auth/google`
pub async fn google_redirect_handler(
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.auth_service.google_authorize_url()?;
    Ok(Redirect::temporary(&url))
}

/// Completes the OAuth callback and signs the user in.
///
/// # Endpoint
///
/// `GET /api/auth/google/callback?code=...`
pub async fn google_callback_handler(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = state.auth_service.google_login(&params.code).await?;
    Ok(Json(pair.into()))
}
