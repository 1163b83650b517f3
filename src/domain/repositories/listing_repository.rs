//! Repository trait for listing data access.

use crate::domain::entities::{Listing, NewListing};
use crate::domain::listing_filter::ListingFilter;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for property listings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgListingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Runs a filter against the store, newest first, paginated.
    ///
    /// Rows satisfy every present filter field; an unparseable price
    /// bound yields no rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError>;

    /// Counts rows matching a filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: &ListingFilter) -> Result<i64, AppError>;

    /// Fetches one listing by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, AppError>;

    /// Fetches the listings whose ids appear in `ids`, newest first.
    ///
    /// Unknown ids are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Listing>, AppError>;

    /// Persists a new listing and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_listing: NewListing) -> Result<Listing, AppError>;

    /// Returns up to `n` listings sampled at random.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn sample(&self, n: i64) -> Result<Vec<Listing>, AppError>;
}
