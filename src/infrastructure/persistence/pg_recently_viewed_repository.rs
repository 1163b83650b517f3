//! PostgreSQL implementation of the recently-viewed repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::RecentlyViewed;
use crate::domain::repositories::RecentlyViewedRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct RecentlyViewedRow {
    user_id: i64,
    listing_ids: Vec<i64>,
}

/// PostgreSQL repository for per-user recently-viewed sets.
pub struct PgRecentlyViewedRepository {
    pool: Arc<PgPool>,
}

impl PgRecentlyViewedRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecentlyViewedRepository for PgRecentlyViewedRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<RecentlyViewed>, AppError> {
        let row: Option<RecentlyViewedRow> =
            sqlx::query_as("SELECT user_id, listing_ids FROM recently_viewed WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|r| RecentlyViewed {
            user_id: r.user_id,
            listing_ids: r.listing_ids,
        }))
    }

    async fn add(&self, user_id: i64, listing_id: i64) -> Result<(), AppError> {
        // Single-statement upsert + set-add: concurrent adds of the same
        // id cannot duplicate it.
        sqlx::query(
            r#"
            INSERT INTO recently_viewed (user_id, listing_ids)
            VALUES ($1, ARRAY[$2]::bigint[])
            ON CONFLICT (user_id) DO UPDATE
            SET listing_ids = CASE
                    WHEN recently_viewed.listing_ids @> ARRAY[$2]::bigint[]
                        THEN recently_viewed.listing_ids
                    ELSE array_append(recently_viewed.listing_ids, $2)
                END,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(listing_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
