//! Handlers for payment endpoints.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::common::MessageResponse;
use crate::api::dto::payment::{CreateOrderRequest, CreateOrderResponse, MarkUserRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a payment-gateway order for the caller.
///
/// # Endpoint
///
/// `POST /api/payments/create-order`
///
/// # Errors
///
/// Returns 500 when the gateway call fails.
pub async fn create_order_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    payload.validate()?;

    let order = state.payment_service.create_order(payload.amount).await?;
    Ok(Json(order.into()))
}

/// Marks a user subscribed after a settled payment.
///
/// # Endpoint
///
/// `POST /api/payments/mark-user`
///
/// # Errors
///
/// Returns 400 on a missing/invalid email, 404 when no user matches.
pub async fn mark_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<MarkUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .payment_service
        .mark_subscribed(
            &payload.email,
            payload.payment_id.as_deref().unwrap_or_default(),
            payload.subscription_type.as_deref(),
        )
        .await?;

    Ok(Json(MessageResponse::new("User subscribed")))
}
