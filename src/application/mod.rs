//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation, and business rules
//! over the domain traits, and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::listing_service::ListingService`] - Cache-aside listing reads and creation
//! - [`services::auth_service::AuthService`] - Password/OTP/OAuth authentication
//! - [`services::account_service::AccountService`] - Favourites, recents, profile, transactions
//! - [`services::payment_service::PaymentService`] - Gateway orders and subscription marking
//! - [`services::outreach_service::OutreachService`] - Newsletter and contact submissions

pub mod services;
