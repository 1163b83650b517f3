//! DTOs for newsletter and contact endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

/// Request to subscribe to the newsletter.
#[derive(Debug, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Contact-form submission requesting a callback.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
}

/// Serde deserializer accepting RFC 3339 timestamps or bare dates.
mod flexible_date {
    use super::*;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(|date| date.and_hms_opt(0, 0, 0).unwrap().and_utc())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_date_accepts_both_formats() {
        let rfc3339: ContactFormRequest = serde_json::from_str(
            r#"{"name": "Asha", "email": "a@example.com", "date": "2026-08-10T09:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(rfc3339.date.to_rfc3339(), "2026-08-10T09:30:00+00:00");

        let bare: ContactFormRequest = serde_json::from_str(
            r#"{"name": "Asha", "email": "a@example.com", "date": "2026-08-10"}"#,
        )
        .unwrap();
        assert_eq!(bare.date.to_rfc3339(), "2026-08-10T00:00:00+00:00");
    }

    #[test]
    fn test_contact_date_rejects_garbage() {
        let result = serde_json::from_str::<ContactFormRequest>(
            r#"{"name": "Asha", "email": "a@example.com", "date": "next tuesday"}"#,
        );
        assert!(result.is_err());
    }
}
