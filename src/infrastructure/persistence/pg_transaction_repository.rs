//! PostgreSQL implementation of the transaction repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Transaction;
use crate::domain::repositories::TransactionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    user_id: i64,
    transaction_date: DateTime<Utc>,
    location: String,
    kind: String,
    price: String,
    area: i64,
}

/// PostgreSQL repository for transaction history reads.
pub struct PgTransactionRepository {
    pool: Arc<PgPool>,
}

impl PgTransactionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Transaction>, AppError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, transaction_date, location, kind, price, area
            FROM transactions
            WHERE user_id = $1
            ORDER BY transaction_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Transaction {
                id: r.id,
                user_id: r.user_id,
                transaction_date: r.transaction_date,
                location: r.location,
                kind: r.kind,
                price: r.price,
                area: r.area,
            })
            .collect())
    }
}
