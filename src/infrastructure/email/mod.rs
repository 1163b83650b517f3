//! Outbound email: delivery trait, provider client, and background worker.
//!
//! - [`Mailer`] - delivery contract
//! - [`HttpMailer`] - transactional mail provider over HTTP
//! - [`NullMailer`] - logging no-op for unconfigured environments
//! - [`run_email_worker`] - channel consumer with retry

mod http_mailer;
mod null_mailer;
pub mod service;
mod worker;

pub use http_mailer::HttpMailer;
pub use null_mailer::NullMailer;
pub use service::{MailResult, Mailer, MailerError};
pub use worker::run_email_worker;
