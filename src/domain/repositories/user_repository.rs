//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for account lookup and the owner-scoped
/// mutations the auth and payment flows need.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by OAuth provider id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError>;

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Stores a pending OTP and its expiry on the user row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_otp(
        &self,
        id: i64,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Clears any pending OTP.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clear_otp(&self, id: i64) -> Result<(), AppError>;

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Rotates the stored refresh-token HMAC; `None` revokes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_refresh_token_hash<'a>(
        &self,
        id: i64,
        refresh_token_hash: Option<&'a str>,
    ) -> Result<(), AppError>;

    /// Attaches OAuth identity details to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn attach_google_identity<'a>(
        &self,
        id: i64,
        google_id: &str,
        name: Option<&'a str>,
        photo: Option<&'a str>,
    ) -> Result<(), AppError>;

    /// Marks a user as subscribed after a successful payment.
    ///
    /// Returns the number of rows updated (0 when the email is unknown).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn mark_subscribed<'a>(
        &self,
        email: &str,
        payment_id: &str,
        subscription_type: Option<&'a str>,
        subscription_date: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Counts all accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
