//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; concrete implementations live
//! in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ListingRepository`] - Listing queries and creation
//! - [`UserRepository`] - Accounts and owner-scoped mutations
//! - [`FavouriteRepository`] - Favourite listing sets
//! - [`RecentlyViewedRepository`] - Recently-viewed listing sets
//! - [`TransactionRepository`] - Transaction history
//! - [`OutreachRepository`] - Newsletter and contact records

pub mod favourite_repository;
pub mod listing_repository;
pub mod outreach_repository;
pub mod recently_viewed_repository;
pub mod transaction_repository;
pub mod user_repository;

pub use favourite_repository::FavouriteRepository;
pub use listing_repository::ListingRepository;
pub use outreach_repository::OutreachRepository;
pub use recently_viewed_repository::RecentlyViewedRepository;
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use favourite_repository::MockFavouriteRepository;
#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use outreach_repository::MockOutreachRepository;
#[cfg(test)]
pub use recently_viewed_repository::MockRecentlyViewedRepository;
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
