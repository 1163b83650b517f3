//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, collaborator selection,
//! worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::email::{HttpMailer, Mailer, NullMailer, run_email_worker};
use crate::infrastructure::media::{HttpMediaStore, MediaStore, NullMediaStore};
use crate::infrastructure::oauth::{GoogleOAuthProvider, NullOAuthProvider, OAuthProvider};
use crate::infrastructure::payment::{HttpPaymentGateway, NullPaymentGateway, PaymentGateway};
use crate::infrastructure::persistence::{
    PgFavouriteRepository, PgListingRepository, PgOutreachRepository,
    PgRecentlyViewedRepository, PgTransactionRepository, PgUserRepository,
};
use crate::application::services::{
    AccountService, AuthService, ListingService, OutreachService, PaymentService,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - Mail / media / payment / OAuth collaborators (HTTP clients when
///   configured, Null fallbacks otherwise)
/// - Background email worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server
/// bind fail.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail) => Arc::new(HttpMailer::new(
            mail.api_url.clone(),
            mail.api_key.clone(),
            mail.from.clone(),
        )),
        None => Arc::new(NullMailer::new()),
    };

    let media_store: Arc<dyn MediaStore> = match &config.media {
        Some(media) => Arc::new(HttpMediaStore::new(
            media.upload_url.clone(),
            media.api_key.clone(),
        )),
        None => Arc::new(NullMediaStore::new()),
    };

    let payment_gateway: Arc<dyn PaymentGateway> = match &config.payment {
        Some(payment) => Arc::new(HttpPaymentGateway::new(
            payment.api_url.clone(),
            payment.key_id.clone(),
            payment.key_secret.clone(),
        )),
        None => Arc::new(NullPaymentGateway::new()),
    };

    let oauth_provider: Arc<dyn OAuthProvider> = match &config.oauth {
        Some(oauth) => Arc::new(GoogleOAuthProvider::new(
            oauth.client_id.clone(),
            oauth.client_secret.clone(),
            oauth.callback_url.clone(),
        )),
        None => Arc::new(NullOAuthProvider::new()),
    };

    let (mail_tx, mail_rx) = mpsc::channel(config.mail_queue_capacity);
    tokio::spawn(run_email_worker(mail_rx, mailer));
    tracing::info!("Email worker started");

    let pool = Arc::new(pool);
    let listing_repository = Arc::new(PgListingRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let favourite_repository = Arc::new(PgFavouriteRepository::new(pool.clone()));
    let recently_viewed_repository = Arc::new(PgRecentlyViewedRepository::new(pool.clone()));
    let transaction_repository = Arc::new(PgTransactionRepository::new(pool.clone()));
    let outreach_repository = Arc::new(PgOutreachRepository::new(pool.clone()));

    let listing_service = Arc::new(ListingService::new(
        listing_repository,
        cache.clone(),
        media_store,
        config.cache_ttl_seconds,
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        oauth_provider,
        mail_tx.clone(),
        config.jwt_secret.clone(),
        config.token_signing_secret.clone(),
        config.access_token_ttl_seconds,
        config.refresh_token_ttl_seconds,
        config.otp_ttl_seconds,
    ));
    let account_service = Arc::new(AccountService::new(
        favourite_repository,
        recently_viewed_repository,
        transaction_repository,
        user_repository.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(payment_gateway, user_repository));
    let outreach_service = Arc::new(OutreachService::new(
        outreach_repository,
        mail_tx.clone(),
        config.admin_email.clone(),
    ));

    let state = AppState {
        listing_service,
        auth_service,
        account_service,
        payment_service,
        outreach_service,
        cache,
        mail_sender: mail_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
