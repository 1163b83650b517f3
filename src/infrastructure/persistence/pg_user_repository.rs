//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, email, password_hash, google_id, name, photo, \
     refresh_token_hash, otp, otp_expires_at, is_subscribed, subscription_type, \
     subscription_date, payment_id, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: Option<String>,
    google_id: Option<String>,
    name: Option<String>,
    photo: Option<String>,
    refresh_token_hash: Option<String>,
    otp: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    is_subscribed: bool,
    subscription_type: Option<String>,
    subscription_date: Option<DateTime<Utc>>,
    payment_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            google_id: row.google_id,
            name: row.name,
            photo: row.photo,
            refresh_token_hash: row.refresh_token_hash,
            otp: row.otp,
            otp_expires_at: row.otp_expires_at,
            is_subscribed: row.is_subscribed,
            subscription_type: row.subscription_type,
            subscription_date: row.subscription_date,
            payment_id: row.payment_id,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for account storage and owner-scoped mutations.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
                .bind(email)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE google_id = $1",
            USER_COLUMNS
        ))
        .bind(google_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (email, password_hash, google_id, name, photo, otp, otp_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.google_id)
        .bind(new_user.name)
        .bind(new_user.photo)
        .bind(new_user.otp)
        .bind(new_user.otp_expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(User::from(row))
    }

    async fn set_otp(
        &self,
        id: i64,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET otp = $2, otp_expires_at = $3 WHERE id = $1")
            .bind(id)
            .bind(otp)
            .bind(expires_at)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn clear_otp(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET otp = NULL, otp_expires_at = NULL WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_refresh_token_hash<'a>(
        &self,
        id: i64,
        refresh_token_hash: Option<&'a str>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_token_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(refresh_token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn attach_google_identity<'a>(
        &self,
        id: i64,
        google_id: &str,
        name: Option<&'a str>,
        photo: Option<&'a str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET google_id = $2, name = COALESCE($3, name), photo = COALESCE($4, photo) WHERE id = $1",
        )
        .bind(id)
        .bind(google_id)
        .bind(name)
        .bind(photo)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn mark_subscribed<'a>(
        &self,
        email: &str,
        payment_id: &str,
        subscription_type: Option<&'a str>,
        subscription_date: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET payment_id = $2,
                is_subscribed = TRUE,
                subscription_type = $3,
                subscription_date = $4
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(payment_id)
        .bind(subscription_type)
        .bind(subscription_date)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
