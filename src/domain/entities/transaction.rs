//! Property transaction records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recorded property transaction belonging to a user.
///
/// `kind` is one of `"APARTMENT"` or `"VILLA"`; `price` is a display
/// string because source values include forms like `"1.5 khs"`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub transaction_date: DateTime<Utc>,
    pub location: String,
    pub kind: String,
    pub price: String,
    pub area: i64,
}
