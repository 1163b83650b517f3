//! Account authentication: password + OTP signup, login, password reset,
//! refresh tokens, and OAuth sign-in.

use std::sync::Arc;

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::email_job::EmailJob;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::oauth::{OAuthProfile, OAuthProvider};
use crate::utils::otp::generate_otp;

type HmacSha256 = Hmac<Sha256>;

/// JWT claims carried by both token kinds.
///
/// `kind` distinguishes access from refresh tokens so one cannot be
/// replayed as the other.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: i64,
    pub kind: String,
}

/// An access/refresh token pair issued after successful authentication.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Service for account authentication flows.
///
/// Passwords are bcrypt-hashed. Refresh tokens are stored as an
/// HMAC-SHA256 (keyed by `signing_secret`) rather than plaintext: a
/// reader of the users table cannot replay a refresh token, and rotating
/// the stored MAC invalidates all previously issued refresh tokens.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    oauth_provider: Arc<dyn OAuthProvider>,
    mail_sender: mpsc::Sender<EmailJob>,
    jwt_secret: String,
    signing_secret: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    otp_ttl_seconds: i64,
}

impl AuthService {
    /// Creates a new authentication service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        oauth_provider: Arc<dyn OAuthProvider>,
        mail_sender: mpsc::Sender<EmailJob>,
        jwt_secret: String,
        signing_secret: String,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
        otp_ttl_seconds: i64,
    ) -> Self {
        Self {
            user_repository,
            oauth_provider,
            mail_sender,
            jwt_secret,
            signing_secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
            otp_ttl_seconds,
        }
    }

    /// Registers a new account and emails a verification OTP.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already in use",
                json!({ "email": email }),
            ));
        }

        let otp = generate_otp();
        let otp_expires_at = Utc::now() + Duration::seconds(self.otp_ttl_seconds);

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|_| AppError::internal("Password hashing failed", json!({})))?;

        self.user_repository
            .insert(NewUser {
                email: email.to_string(),
                password_hash: Some(password_hash),
                google_id: None,
                name: None,
                photo: None,
                otp: Some(otp.clone()),
                otp_expires_at: Some(otp_expires_at),
            })
            .await?;

        self.enqueue_email(
            email,
            "Verify your email",
            &format!("Your OTP is: {}", otp),
        );

        Ok(())
    }

    /// Verifies a signup OTP and issues the first token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the user is unknown, the OTP
    /// does not match, or it has expired.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<TokenPair, AppError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .filter(|user| user.otp_matches(otp, Utc::now()))
            .ok_or_else(|| AppError::bad_request("Invalid or expired OTP", json!({})))?;

        self.user_repository.clear_otp(user.id).await?;

        self.issue_token_pair(user.id).await
    }

    /// Authenticates email + password and issues a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on unknown email, missing
    /// password (OAuth-only account), or wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let invalid = || AppError::unauthorized("Invalid credentials", json!({}));

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        let password_hash = user.password_hash.as_deref().ok_or_else(invalid)?;

        let verified = bcrypt::verify(password, password_hash).unwrap_or(false);
        if !verified {
            return Err(invalid());
        }

        self.issue_token_pair(user.id).await
    }

    /// Emails a password-reset OTP.
    ///
    /// The OTP lives on the user row with an expiry, so it survives
    /// process restarts and is shared across instances.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown email.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        let otp = generate_otp();
        let expires_at = Utc::now() + Duration::seconds(self.otp_ttl_seconds);

        self.user_repository
            .set_otp(user.id, &otp, expires_at)
            .await?;

        self.enqueue_email(
            email,
            "Reset your password",
            &format!("Your OTP is: {}", otp),
        );

        Ok(())
    }

    /// Resets the password after checking the reset OTP.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the user is unknown or the
    /// OTP does not match or has expired.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .filter(|user| user.otp_matches(otp, Utc::now()))
            .ok_or_else(|| AppError::bad_request("Invalid or expired OTP", json!({})))?;

        let password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|_| AppError::internal("Password hashing failed", json!({})))?;

        self.user_repository
            .set_password_hash(user.id, &password_hash)
            .await?;
        self.user_repository.clear_otp(user.id).await?;

        Ok(())
    }

    /// Sets a first password on an OAuth-created account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown email and
    /// [`AppError::Validation`] when a password is already set.
    pub async fn set_password(&self, email: &str, password: &str) -> Result<(), AppError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        if user.has_password() {
            return Err(AppError::bad_request(
                "Password already set. Please log in using email and password.",
                json!({}),
            ));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|_| AppError::internal("Password hashing failed", json!({})))?;

        self.user_repository
            .set_password_hash(user.id, &password_hash)
            .await?;

        Ok(())
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The submitted token must both verify as a refresh JWT and match
    /// the MAC stored on the user row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] on any verification failure.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let rejected = || AppError::forbidden("Token expired or invalid", json!({}));

        let claims = self.decode_token(refresh_token).map_err(|_| rejected())?;
        if claims.kind != "refresh" {
            return Err(rejected());
        }

        let user = self
            .user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(rejected)?;

        let submitted_mac = self.hash_token(refresh_token);
        if user.refresh_token_hash.as_deref() != Some(submitted_mac.as_str()) {
            return Err(rejected());
        }

        self.issue_token(user.id, "access", self.access_ttl_seconds)
    }

    /// Authenticates a bearer access token and loads its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token is malformed,
    /// expired, of the wrong kind, or its user no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let rejected = || {
            AppError::unauthorized(
                "Invalid or expired token",
                json!({"reason": "Bearer token verification failed"}),
            )
        };

        let claims = self.decode_token(token).map_err(|_| rejected())?;
        if claims.kind != "access" {
            return Err(rejected());
        }

        self.user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(rejected)
    }

    /// URL of the OAuth consent screen to redirect the user to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when no provider is configured.
    pub fn google_authorize_url(&self) -> Result<String, AppError> {
        self.oauth_provider.authorize_url().map_err(|e| {
            warn!(error = %e, "OAuth authorize URL unavailable");
            AppError::internal("OAuth sign-in failed", json!({}))
        })
    }

    /// Completes the OAuth callback: exchanges the code and signs the
    /// profile's user in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the provider exchange fails.
    pub async fn google_login(&self, code: &str) -> Result<TokenPair, AppError> {
        let profile = self.oauth_provider.fetch_profile(code).await.map_err(|e| {
            warn!(error = %e, "OAuth profile exchange failed");
            AppError::internal("OAuth sign-in failed", json!({}))
        })?;

        self.oauth_login(profile).await
    }

    /// Signs in a verified OAuth profile.
    ///
    /// Resolution order: account with this provider id, then account with
    /// the same email (identity gets attached), then a fresh account.
    pub async fn oauth_login(&self, profile: OAuthProfile) -> Result<TokenPair, AppError> {
        let user_id = match self
            .user_repository
            .find_by_google_id(&profile.provider_id)
            .await?
        {
            Some(user) => user.id,
            None => match self.user_repository.find_by_email(&profile.email).await? {
                Some(user) => {
                    self.user_repository
                        .attach_google_identity(
                            user.id,
                            &profile.provider_id,
                            profile.name.as_deref(),
                            profile.photo.as_deref(),
                        )
                        .await?;
                    user.id
                }
                None => {
                    let user = self
                        .user_repository
                        .insert(NewUser {
                            email: profile.email.clone(),
                            password_hash: None,
                            google_id: Some(profile.provider_id.clone()),
                            name: profile.name.clone(),
                            photo: profile.photo.clone(),
                            otp: None,
                            otp_expires_at: None,
                        })
                        .await?;
                    user.id
                }
            },
        };

        self.issue_token_pair(user_id).await
    }

    /// Issues an access + refresh pair and rotates the stored refresh MAC.
    async fn issue_token_pair(&self, user_id: i64) -> Result<TokenPair, AppError> {
        let access_token = self.issue_token(user_id, "access", self.access_ttl_seconds)?;
        let refresh_token = self.issue_token(user_id, "refresh", self.refresh_ttl_seconds)?;

        let refresh_mac = self.hash_token(&refresh_token);
        self.user_repository
            .set_refresh_token_hash(user_id, Some(&refresh_mac))
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn issue_token(&self, user_id: i64, kind: &str, ttl_seconds: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + Duration::seconds(ttl_seconds)).timestamp(),
            kind: kind.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| AppError::internal("Token issuance failed", json!({})))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }

    /// Hashes a token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Queues a notification email; a full queue drops the message.
    fn enqueue_email(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.mail_sender.try_send(EmailJob::new(to, subject, body)) {
            warn!(to, subject, error = %e, "email queue full, dropping message");
        }
    }
}
