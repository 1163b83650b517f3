//! Repository trait for newsletter subscribers and contact requests.

use crate::domain::entities::{ContactRequest, Subscriber};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for outreach records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOutreachRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutreachRepository: Send + Sync {
    /// Finds a newsletter subscriber by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, AppError>;

    /// Registers a newsletter subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already subscribed.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_subscriber(&self, email: &str) -> Result<Subscriber, AppError>;

    /// Stores a contact-form submission.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        requested_date: DateTime<Utc>,
    ) -> Result<ContactRequest, AppError>;

    /// Counts newsletter subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_subscribers(&self) -> Result<i64, AppError>;
}
