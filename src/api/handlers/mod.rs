//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod favourites;
pub mod health;
pub mod listings;
pub mod outreach;
pub mod payments;
pub mod users;

pub use auth::{
    google_callback_handler, google_redirect_handler, login_handler, refresh_token_handler,
    request_reset_handler, reset_password_handler, set_password_handler, signup_handler,
    verify_otp_handler,
};
pub use favourites::{
    add_recently_viewed_handler, favourites_handler, recently_viewed_handler,
    toggle_favourite_handler,
};
pub use health::health_handler;
pub use listings::{
    create_listing_handler, list_listings_handler, listing_detail_handler,
    listings_by_ids_handler, random_listings_handler,
};
pub use outreach::{contact_handler, newsletter_handler};
pub use payments::{create_order_handler, mark_user_handler};
pub use users::{profile_handler, transactions_handler};
