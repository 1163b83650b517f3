//! Repository trait for property transaction records.

use crate::domain::entities::Transaction;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for a user's transaction history.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTransactionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Fetches the caller's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Transaction>, AppError>;
}
