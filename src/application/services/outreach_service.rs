//! Newsletter subscriptions and contact-form submissions, with admin
//! notification emails.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::email_job::EmailJob;
use crate::domain::repositories::OutreachRepository;
use crate::error::AppError;

/// Service for public outreach endpoints.
pub struct OutreachService {
    outreach_repository: Arc<dyn OutreachRepository>,
    mail_sender: mpsc::Sender<EmailJob>,
    admin_email: Option<String>,
}

impl OutreachService {
    /// Creates a new outreach service.
    pub fn new(
        outreach_repository: Arc<dyn OutreachRepository>,
        mail_sender: mpsc::Sender<EmailJob>,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            outreach_repository,
            mail_sender,
            admin_email,
        }
    }

    /// Subscribes an email to the newsletter and notifies the admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already subscribed.
    pub async fn subscribe(&self, email: &str) -> Result<(), AppError> {
        if self
            .outreach_repository
            .find_subscriber(email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Already subscribed",
                json!({ "email": email }),
            ));
        }

        self.outreach_repository.insert_subscriber(email).await?;

        self.notify_admin(
            "New newsletter subscription",
            &format!("New subscriber: {}", email),
        );

        Ok(())
    }

    /// Stores a contact-form submission and notifies the admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn submit_contact(
        &self,
        name: &str,
        email: &str,
        requested_date: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.outreach_repository
            .insert_contact(name, email, requested_date)
            .await?;

        self.notify_admin(
            "New contact form submission",
            &format!(
                "New contact submission\n\nName: {}\nEmail: {}\nDate: {}",
                name,
                email,
                requested_date.format("%Y-%m-%d")
            ),
        );

        Ok(())
    }

    fn notify_admin(&self, subject: &str, body: &str) {
        let Some(admin_email) = &self.admin_email else {
            debug!(subject, "no admin email configured, skipping notification");
            return;
        };

        if let Err(e) = self
            .mail_sender
            .try_send(EmailJob::new(admin_email, subject, body))
        {
            warn!(subject, error = %e, "email queue full, dropping admin notification");
        }
    }
}
