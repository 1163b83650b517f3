//! PostgreSQL implementation of the outreach repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ContactRequest, Subscriber};
use crate::domain::repositories::OutreachRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    requested_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for newsletter subscribers and contact requests.
pub struct PgOutreachRepository {
    pool: Arc<PgPool>,
}

impl PgOutreachRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutreachRepository for PgOutreachRepository {
    async fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, AppError> {
        let row: Option<SubscriberRow> =
            sqlx::query_as("SELECT id, email, created_at FROM subscribers WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|r| Subscriber {
            id: r.id,
            email: r.email,
            created_at: r.created_at,
        }))
    }

    async fn insert_subscriber(&self, email: &str) -> Result<Subscriber, AppError> {
        let row: SubscriberRow = sqlx::query_as(
            "INSERT INTO subscribers (email) VALUES ($1) RETURNING id, email, created_at",
        )
        .bind(email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Subscriber {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        })
    }

    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        requested_date: DateTime<Utc>,
    ) -> Result<ContactRequest, AppError> {
        let row: ContactRow = sqlx::query_as(
            r#"
            INSERT INTO contact_requests (name, email, requested_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, requested_date, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(requested_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(ContactRequest {
            id: row.id,
            name: row.name,
            email: row.email,
            requested_date: row.requested_date,
            created_at: row.created_at,
        })
    }

    async fn count_subscribers(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
