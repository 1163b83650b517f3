//! Background worker draining the email queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error};

use super::service::Mailer;
use crate::domain::email_job::EmailJob;

/// Maximum delivery attempts per job (initial try + retries).
const MAX_ATTEMPTS: usize = 4;

/// Consumes email jobs from the channel and delivers them via the mailer.
///
/// Delivery failures are retried with jittered exponential backoff; a job
/// that exhausts its attempts is dropped with an error log. The worker
/// runs until the sending side of the channel is closed.
pub async fn run_email_worker(mut rx: mpsc::Receiver<EmailJob>, mailer: Arc<dyn Mailer>) {
    while let Some(job) = rx.recv().await {
        // Base 10ms exponentiates per attempt: ~10ms, ~100ms, ~1s.
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let result = Retry::spawn(strategy, || {
            let mailer = mailer.clone();
            let job = job.clone();
            async move { mailer.send(&job.to, &job.subject, &job.body).await }
        })
        .await;

        match result {
            Ok(()) => debug!(to = %job.to, subject = %job.subject, "email delivered"),
            Err(e) => {
                error!(to = %job.to, subject = %job.subject, error = %e, "email dropped after retries")
            }
        }
    }
}
