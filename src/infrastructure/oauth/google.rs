//! Google OAuth 2.0 provider.

use super::service::{OAuthError, OAuthProfile, OAuthProvider, OAuthResult};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

/// Google sign-in via the standard authorization-code flow.
pub struct GoogleOAuthProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl GoogleOAuthProvider {
    pub fn new(client_id: String, client_secret: String, callback_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            callback_url,
        }
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn authorize_url(&self) -> OAuthResult<String> {
        let mut url =
            Url::parse(AUTH_ENDPOINT).map_err(|e| OAuthError::Request(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile");

        Ok(url.into())
    }

    async fn fetch_profile(&self, code: &str) -> OAuthResult<OAuthProfile> {
        let token_response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::Request(e.to_string()))?;

        if !token_response.status().is_success() {
            let status = token_response.status();
            let detail = token_response.text().await.unwrap_or_default();
            return Err(OAuthError::Provider(format!("{}: {}", status, detail)));
        }

        let token: TokenResponse = token_response
            .json()
            .await
            .map_err(|e| OAuthError::Provider(e.to_string()))?;

        let info_response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Request(e.to_string()))?;

        if !info_response.status().is_success() {
            let status = info_response.status();
            return Err(OAuthError::Provider(status.to_string()));
        }

        let info: UserInfo = info_response
            .json()
            .await
            .map_err(|e| OAuthError::Provider(e.to_string()))?;

        Ok(OAuthProfile {
            provider_id: info.sub,
            email: info.email,
            name: info.name,
            photo: info.picture,
        })
    }
}
