//! No-op mailer for environments without a configured provider.

use super::service::{Mailer, MailResult};
use async_trait::async_trait;
use tracing::info;

/// Mailer that logs messages instead of delivering them.
///
/// Used when no mail provider is configured; OTP and notification flows
/// still work end to end, with the message content visible in the logs.
pub struct NullMailer;

impl NullMailer {
    pub fn new() -> Self {
        info!("Using NullMailer (email delivery disabled)");
        Self
    }
}

impl Default for NullMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> MailResult<()> {
        info!(to, subject, "email suppressed (no mail provider configured)");
        Ok(())
    }
}
