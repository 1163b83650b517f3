//! HTTP mail-provider API client.

use super::service::{Mailer, MailerError, MailResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Mailer that posts messages to a transactional mail provider's HTTP API.
///
/// The provider endpoint accepts
/// `{"from", "to", "subject", "text"}` with a bearer API key.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> MailResult<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(|e| MailerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Provider(format!("{}: {}", status, detail)));
        }

        debug!(to, subject, "email accepted by provider");
        Ok(())
    }
}
