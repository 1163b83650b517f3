//! Mailer trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during email delivery.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail request error: {0}")]
    Request(String),
    #[error("Mail provider rejected the message: {0}")]
    Provider(String),
}

/// Result type for mail operations.
pub type MailResult<T> = Result<T, MailerError>;

/// Trait for outbound transactional email delivery.
///
/// Delivery is a black-box collaborator: the application only ever hands
/// over a recipient, subject, and plain-text body. Messages are sent by
/// the background worker, never inline in a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::HttpMailer`] - HTTP mail-provider API client
/// - [`crate::infrastructure::email::NullMailer`] - Logs instead of sending
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers a plain-text email.
    async fn send(&self, to: &str, subject: &str, body: &str) -> MailResult<()>;
}
