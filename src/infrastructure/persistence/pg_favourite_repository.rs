//! PostgreSQL implementation of the favourite repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Favourite;
use crate::domain::repositories::FavouriteRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct FavouriteRow {
    user_id: i64,
    listing_ids: Vec<i64>,
}

/// PostgreSQL repository for per-user favourite sets.
pub struct PgFavouriteRepository {
    pool: Arc<PgPool>,
}

impl PgFavouriteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavouriteRepository for PgFavouriteRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<Favourite>, AppError> {
        let row: Option<FavouriteRow> =
            sqlx::query_as("SELECT user_id, listing_ids FROM favourites WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|r| Favourite {
            user_id: r.user_id,
            listing_ids: r.listing_ids,
        }))
    }

    async fn insert(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<Favourite, AppError> {
        let row: FavouriteRow = sqlx::query_as(
            "INSERT INTO favourites (user_id, listing_ids) VALUES ($1, $2) RETURNING user_id, listing_ids",
        )
        .bind(user_id)
        .bind(listing_ids)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Favourite {
            user_id: row.user_id,
            listing_ids: row.listing_ids,
        })
    }

    async fn set_listing_ids(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<(), AppError> {
        sqlx::query("UPDATE favourites SET listing_ids = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id)
            .bind(listing_ids)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
