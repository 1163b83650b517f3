//! Newsletter subscribers and contact requests.

use chrono::{DateTime, Utc};

/// A newsletter subscriber.
#[derive(Debug, Clone)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A contact-form submission requesting a callback on a given date.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub requested_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
