//! Core business entities.

pub mod favourite;
pub mod listing;
pub mod outreach;
pub mod transaction;
pub mod user;

pub use favourite::{Favourite, RecentlyViewed};
pub use listing::{Amenities, Coordinates, Listing, ListingPage, NewListing};
pub use outreach::{ContactRequest, Subscriber};
pub use transaction::Transaction;
pub use user::{NewUser, User};
