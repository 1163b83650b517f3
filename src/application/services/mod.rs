//! Business logic services for the application layer.

pub mod account_service;
pub mod auth_service;
pub mod listing_service;
pub mod outreach_service;
pub mod payment_service;

pub use account_service::AccountService;
pub use auth_service::{AuthService, Claims, TokenPair};
pub use listing_service::ListingService;
pub use outreach_service::OutreachService;
pub use payment_service::PaymentService;
