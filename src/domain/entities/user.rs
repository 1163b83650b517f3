//! User account entity.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` is absent for accounts created through OAuth that have
/// not set a password yet. `refresh_token_hash` holds the HMAC of the
/// currently valid refresh token; rotating it invalidates older tokens.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub refresh_token_hash: Option<String>,
    pub otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub is_subscribed: bool,
    pub subscription_type: Option<String>,
    pub subscription_date: Option<DateTime<Utc>>,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if a password has been set for this account.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Checks a submitted OTP against the stored one.
    ///
    /// Valid only when an OTP is pending, the digits match, and the
    /// expiry has not passed.
    pub fn otp_matches(&self, submitted: &str, now: DateTime<Utc>) -> bool {
        match (&self.otp, self.otp_expires_at) {
            (Some(stored), Some(expires_at)) => stored == submitted && now < expires_at,
            _ => false,
        }
    }
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
}
