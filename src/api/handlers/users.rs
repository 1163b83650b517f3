//! Handlers for the caller's profile and transaction history.

use axum::{Extension, Json, extract::State};

use crate::api::dto::account::{ProfileResponse, TransactionsResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Serves the caller's own account record.
///
/// # Endpoint
///
/// `GET /api/users/profile`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.account_service.profile(user.id).await?;
    Ok(Json(user.into()))
}

/// Serves the caller's transaction history, newest first.
///
/// # Endpoint
///
/// `GET /api/users/transactions`
pub async fn transactions_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let transactions = state.account_service.transactions(user.id).await?;
    Ok(Json(TransactionsResponse { transactions }))
}
