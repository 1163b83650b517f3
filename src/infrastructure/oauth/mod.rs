//! OAuth identity provider integration.
//!
//! - [`OAuthProvider`] - consent URL + code-for-profile exchange contract
//! - [`GoogleOAuthProvider`] - Google sign-in
//! - [`NullOAuthProvider`] - disabled sign-in

mod google;
mod null_provider;
pub mod service;

pub use google::GoogleOAuthProvider;
pub use null_provider::NullOAuthProvider;
pub use service::{OAuthError, OAuthProfile, OAuthProvider, OAuthResult};
