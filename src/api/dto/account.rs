//! DTOs for owner-scoped account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Transaction, User};

/// Request to toggle a listing in the caller's favourites.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteToggleRequest {
    #[serde(alias = "propertyId")]
    pub listing_id: i64,
}

/// Request to record a listing as recently viewed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedAddRequest {
    #[serde(alias = "propertyId")]
    pub listing_id: i64,
}

/// The caller's listing-id set after a favourites or recents operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingIdsResponse {
    pub listing_ids: Vec<i64>,
}

/// The caller's own account, without credential material.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub has_password: bool,
    pub is_subscribed: bool,
    pub subscription_type: Option<String>,
    pub subscription_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            photo: user.photo.clone(),
            has_password: user.has_password(),
            is_subscribed: user.is_subscribed,
            subscription_type: user.subscription_type.clone(),
            subscription_date: user.subscription_date,
            created_at: user.created_at,
        }
    }
}

/// The caller's transaction history.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}
