//! Placeholder OAuth provider for environments without credentials.

use super::service::{OAuthError, OAuthProfile, OAuthProvider, OAuthResult};
use async_trait::async_trait;
use tracing::info;

/// Provider that rejects every sign-in attempt.
pub struct NullOAuthProvider;

impl NullOAuthProvider {
    pub fn new() -> Self {
        info!("Using NullOAuthProvider (OAuth sign-in disabled)");
        Self
    }
}

impl Default for NullOAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OAuthProvider for NullOAuthProvider {
    fn authorize_url(&self) -> OAuthResult<String> {
        Err(OAuthError::Disabled)
    }

    async fn fetch_profile(&self, _code: &str) -> OAuthResult<OAuthProfile> {
        Err(OAuthError::Disabled)
    }
}
