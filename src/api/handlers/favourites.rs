//! Handlers for the caller's favourite and recently-viewed sets.

use axum::{Extension, Json, extract::State};

use crate::api::dto::account::{
    FavouriteToggleRequest, ListingIdsResponse, RecentlyViewedAddRequest,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Toggles a listing in the caller's favourite set.
///
/// # Endpoint
///
/// `POST /api/listings/favourite`
///
/// A presence-based XOR: the listing is added when absent and removed
/// when present. Responds with the resulting id set.
pub async fn toggle_favourite_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<FavouriteToggleRequest>,
) -> Result<Json<ListingIdsResponse>, AppError> {
    let listing_ids = state
        .account_service
        .toggle_favourite(user.id, payload.listing_id)
        .await?;

    Ok(Json(ListingIdsResponse { listing_ids }))
}

/// Serves the caller's favourite listing ids.
///
/// # Endpoint
///
/// `GET /api/listings/getfavourite`
pub async fn favourites_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ListingIdsResponse>, AppError> {
    let listing_ids = state.account_service.favourites(user.id).await?;
    Ok(Json(ListingIdsResponse { listing_ids }))
}

/// Records a listing as recently viewed. Idempotent.
///
/// # Endpoint
///
/// `POST /api/listings/postrecent`
pub async fn add_recently_viewed_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<RecentlyViewedAddRequest>,
) -> Result<Json<ListingIdsResponse>, AppError> {
    state
        .account_service
        .add_recently_viewed(user.id, payload.listing_id)
        .await?;

    let listing_ids = state.account_service.recently_viewed(user.id).await?;
    Ok(Json(ListingIdsResponse { listing_ids }))
}

/// Serves the caller's recently viewed listing ids.
///
/// # Endpoint
///
/// `GET /api/listings/recent`
pub async fn recently_viewed_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ListingIdsResponse>, AppError> {
    let listing_ids = state.account_service.recently_viewed(user.id).await?;
    Ok(Json(ListingIdsResponse { listing_ids }))
}
