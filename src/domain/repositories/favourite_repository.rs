//! Repository trait for favourite sets.

use crate::domain::entities::Favourite;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-user favourite listing sets.
///
/// The toggle itself is a read-modify-write in the service layer; this
/// trait only exposes the underlying owner-scoped document operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFavouriteRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavouriteRepository: Send + Sync {
    /// Fetches the owner's favourite row, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<Favourite>, AppError>;

    /// Creates the owner's favourite row with an initial id set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<Favourite, AppError>;

    /// Overwrites the owner's id set. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_listing_ids(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<(), AppError>;
}
