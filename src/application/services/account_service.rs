//! Owner-scoped account data: favourites, recently viewed, profile, and
//! transaction history.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Transaction, User};
use crate::domain::repositories::{
    FavouriteRepository, RecentlyViewedRepository, TransactionRepository, UserRepository,
};
use crate::error::AppError;

/// Service for the authenticated caller's own records.
pub struct AccountService {
    favourite_repository: Arc<dyn FavouriteRepository>,
    recently_viewed_repository: Arc<dyn RecentlyViewedRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        favourite_repository: Arc<dyn FavouriteRepository>,
        recently_viewed_repository: Arc<dyn RecentlyViewedRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            favourite_repository,
            recently_viewed_repository,
            transaction_repository,
            user_repository,
        }
    }

    /// Toggles a listing in the caller's favourite set.
    ///
    /// Presence-based XOR: absent row → create with the listing as the
    /// sole member; member → remove; non-member → append. Returns the
    /// resulting id set. The lookup and the write-back are separate store
    /// calls, so concurrent toggles of the same pair race and the last
    /// write wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn toggle_favourite(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        match self.favourite_repository.find_by_owner(user_id).await? {
            None => {
                let favourite = self
                    .favourite_repository
                    .insert(user_id, vec![listing_id])
                    .await?;
                Ok(favourite.listing_ids)
            }
            Some(favourite) => {
                let was_member = favourite.contains(listing_id);
                let mut listing_ids = favourite.listing_ids;

                if was_member {
                    listing_ids.retain(|&id| id != listing_id);
                } else {
                    listing_ids.push(listing_id);
                }

                self.favourite_repository
                    .set_listing_ids(user_id, listing_ids.clone())
                    .await?;

                Ok(listing_ids)
            }
        }
    }

    /// The caller's favourite listing ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn favourites(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .favourite_repository
            .find_by_owner(user_id)
            .await?
            .map(|favourite| favourite.listing_ids)
            .unwrap_or_default())
    }

    /// Records a listing as recently viewed. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn add_recently_viewed(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> Result<(), AppError> {
        self.recently_viewed_repository.add(user_id, listing_id).await
    }

    /// The caller's recently viewed listing ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn recently_viewed(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .recently_viewed_repository
            .find_by_owner(user_id)
            .await?
            .map(|recent| recent.listing_ids)
            .unwrap_or_default())
    }

    /// The caller's own account record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the account has been removed.
    pub async fn profile(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// The caller's transaction history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn transactions(&self, user_id: i64) -> Result<Vec<Transaction>, AppError> {
        self.transaction_repository.find_by_owner(user_id).await
    }
}
