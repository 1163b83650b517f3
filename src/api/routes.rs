//! API route configuration.
//!
//! Routes are grouped by the protection they need; layers (bearer auth,
//! rate limits) are applied by the top-level router in
//! [`crate::routes`].

use crate::api::handlers::{
    add_recently_viewed_handler, contact_handler, create_listing_handler, create_order_handler,
    favourites_handler, google_callback_handler, google_redirect_handler, list_listings_handler,
    listing_detail_handler, listings_by_ids_handler, login_handler, mark_user_handler,
    newsletter_handler, profile_handler, random_listings_handler, recently_viewed_handler,
    refresh_token_handler, request_reset_handler, reset_password_handler, set_password_handler,
    signup_handler, toggle_favourite_handler, transactions_handler, verify_otp_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public listing, auth-utility, payment-callback, and outreach routes.
///
/// # Endpoints
///
/// - `GET  /listings`                 - Filtered collection (cache-aside)
/// - `GET  /listings/random`          - Five random listings
/// - `GET  /listings/{id}`            - Single listing (cache-aside)
/// - `POST /listings/create`          - Create a listing (multipart or JSON)
/// - `POST /listings/by-ids`          - Listings for a set of ids
/// - `POST /auth/request-reset`       - Email a password-reset OTP
/// - `POST /auth/reset-password`      - Apply a password reset
/// - `POST /auth/set-password`        - First password for OAuth accounts
/// - `POST /auth/refresh-token`       - Renew an access token
/// - `GET  /auth/google`              - Redirect to the consent screen
/// - `GET  /auth/google/callback`     - Complete OAuth sign-in
/// - `POST /payments/mark-user`       - Subscription marking callback
/// - `POST /newsletter`               - Newsletter signup
/// - `POST /contact`                  - Contact form
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings_handler))
        .route("/listings/random", get(random_listings_handler))
        .route("/listings/create", post(create_listing_handler))
        .route("/listings/by-ids", post(listings_by_ids_handler))
        .route("/listings/{id}", get(listing_detail_handler))
        .route("/auth/request-reset", post(request_reset_handler))
        .route("/auth/reset-password", post(reset_password_handler))
        .route("/auth/set-password", post(set_password_handler))
        .route("/auth/refresh-token", post(refresh_token_handler))
        .route("/auth/google", get(google_redirect_handler))
        .route("/auth/google/callback", get(google_callback_handler))
        .route("/payments/mark-user", post(mark_user_handler))
        .route("/newsletter", post(newsletter_handler))
        .route("/contact", post(contact_handler))
}

/// Credential routes that get the strict per-IP limiter.
///
/// # Endpoints
///
/// - `POST /auth/signup`
/// - `POST /auth/verify`
/// - `POST /auth/login`
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/verify", post(verify_otp_handler))
        .route("/auth/login", post(login_handler))
}

/// Owner-scoped routes requiring Bearer authentication.
///
/// # Endpoints
///
/// - `POST /listings/favourite`       - Toggle a favourite
/// - `GET  /listings/getfavourite`    - Favourite id set
/// - `POST /listings/postrecent`      - Record a recently-viewed listing
/// - `GET  /listings/recent`          - Recently-viewed id set
/// - `GET  /users/profile`            - Own account record
/// - `GET  /users/transactions`       - Own transaction history
/// - `POST /payments/create-order`    - Create a gateway order
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/listings/favourite", post(toggle_favourite_handler))
        .route("/listings/getfavourite", get(favourites_handler))
        .route("/listings/postrecent", post(add_recently_viewed_handler))
        .route("/listings/recent", get(recently_viewed_handler))
        .route("/users/profile", get(profile_handler))
        .route("/users/transactions", get(transactions_handler))
        .route("/payments/create-order", post(create_order_handler))
}
