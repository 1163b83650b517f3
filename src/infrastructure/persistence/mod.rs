//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! The dynamic listing filter is compiled with `sqlx::QueryBuilder`; all
//! other statements use runtime-bound queries with `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgListingRepository`] - Listing queries and creation
//! - [`PgUserRepository`] - Accounts and owner-scoped mutations
//! - [`PgFavouriteRepository`] - Favourite listing sets
//! - [`PgRecentlyViewedRepository`] - Recently-viewed listing sets
//! - [`PgTransactionRepository`] - Transaction history
//! - [`PgOutreachRepository`] - Newsletter and contact records

pub mod pg_favourite_repository;
pub mod pg_listing_repository;
pub mod pg_outreach_repository;
pub mod pg_recently_viewed_repository;
pub mod pg_transaction_repository;
pub mod pg_user_repository;

pub use pg_favourite_repository::PgFavouriteRepository;
pub use pg_listing_repository::PgListingRepository;
pub use pg_outreach_repository::PgOutreachRepository;
pub use pg_recently_viewed_repository::PgRecentlyViewedRepository;
pub use pg_transaction_repository::PgTransactionRepository;
pub use pg_user_repository::PgUserRepository;
