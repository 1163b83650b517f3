//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    AccountService, AuthService, ListingService, OutreachService, PaymentService,
};
use crate::domain::email_job::EmailJob;
use crate::infrastructure::cache::CacheService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<ListingService>,
    pub auth_service: Arc<AuthService>,
    pub account_service: Arc<AccountService>,
    pub payment_service: Arc<PaymentService>,
    pub outreach_service: Arc<OutreachService>,
    pub cache: Arc<dyn CacheService>,
    pub mail_sender: mpsc::Sender<EmailJob>,
}
