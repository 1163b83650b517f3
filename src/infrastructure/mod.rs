//! Infrastructure layer for external integrations.
//!
//! Implements the contracts the rest of the application consumes:
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`cache`] - Redis cache and no-op fallback
//! - [`email`] - Mail delivery and the background email worker
//! - [`media`] - Object storage for listing images
//! - [`payment`] - Payment gateway client
//! - [`oauth`] - OAuth identity provider client

pub mod cache;
pub mod email;
pub mod media;
pub mod oauth;
pub mod payment;
pub mod persistence;
