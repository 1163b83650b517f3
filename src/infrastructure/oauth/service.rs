//! OAuth provider trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during the OAuth exchange.
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("OAuth request error: {0}")]
    Request(String),
    #[error("OAuth provider rejected the exchange: {0}")]
    Provider(String),
    #[error("OAuth sign-in is not configured")]
    Disabled,
}

/// Result type for OAuth operations.
pub type OAuthResult<T> = Result<T, OAuthError>;

/// A verified identity profile returned by the provider.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider_id: String,
    pub email: String,
    pub name: Option<String>,
    pub photo: Option<String>,
}

/// Trait for the external OAuth identity provider.
///
/// The flow itself (consent screen, code exchange, profile fetch) is the
/// provider's business; the application consumes only the resulting
/// profile.
///
/// # Implementations
///
/// - [`crate::infrastructure::oauth::GoogleOAuthProvider`] - Google sign-in
/// - [`crate::infrastructure::oauth::NullOAuthProvider`] - disabled sign-in
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// URL of the provider's consent screen to redirect the user to.
    fn authorize_url(&self) -> OAuthResult<String>;

    /// Exchanges a callback authorization code for the user's profile.
    async fn fetch_profile(&self, code: &str) -> OAuthResult<OAuthProfile>;
}
