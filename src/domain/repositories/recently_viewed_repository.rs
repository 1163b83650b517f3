//! Repository trait for recently-viewed sets.

use crate::domain::entities::RecentlyViewed;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-user recently-viewed listing sets.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecentlyViewedRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecentlyViewedRepository: Send + Sync {
    /// Fetches the owner's recently-viewed row, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<RecentlyViewed>, AppError>;

    /// Adds a listing to the owner's set, creating the row if absent.
    ///
    /// Idempotent: a listing already in the set is not appended again.
    /// Runs as a single store statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn add(&self, user_id: i64, listing_id: i64) -> Result<(), AppError>;
}
