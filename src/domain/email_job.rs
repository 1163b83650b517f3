//! Outbound email job for asynchronous delivery.

/// A plain-text email queued for background delivery.
///
/// Handlers and services enqueue jobs on a bounded channel instead of
/// awaiting delivery; a full queue drops the job (fire-and-forget).
#[derive(Debug, Clone)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailJob {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}
