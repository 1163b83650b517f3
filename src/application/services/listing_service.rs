//! Listing read and mutation service.
//!
//! Collection and detail reads are cache-aside: the cache is consulted
//! first, the store is authoritative, and results are written back with a
//! fixed TTL. There is deliberately no invalidation on writes — a newly
//! created listing becomes visible to cached reads only when the entry's
//! TTL lapses.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{Listing, ListingPage, NewListing};
use crate::domain::listing_filter::{ListingFilter, detail_cache_key};
use crate::domain::repositories::ListingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::media::{MediaFile, MediaStore};
use crate::utils::address::derive_city;

/// Number of listings returned by a random sample read.
const RANDOM_SAMPLE_COUNT: i64 = 5;

/// Maximum number of image files accepted per listing.
const MAX_LISTING_IMAGES: usize = 10;

/// Service for listing reads and creation.
pub struct ListingService {
    listing_repository: Arc<dyn ListingRepository>,
    cache: Arc<dyn CacheService>,
    media_store: Arc<dyn MediaStore>,
    cache_ttl_seconds: u64,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(
        listing_repository: Arc<dyn ListingRepository>,
        cache: Arc<dyn CacheService>,
        media_store: Arc<dyn MediaStore>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            listing_repository,
            cache,
            media_store,
            cache_ttl_seconds,
        }
    }

    /// Serves a filtered, paginated collection read, preferring cache.
    ///
    /// The cache key is derived from the complete filter set; a hit
    /// bypasses the store entirely. Empty results are cached like any
    /// other. Cache failures degrade to store lookups.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_listings(&self, filter: &ListingFilter) -> Result<ListingPage, AppError> {
        let key = filter.cache_key();

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str::<ListingPage>(&cached) {
                Ok(page) => {
                    counter!("listing_cache_hits_total").increment(1);
                    debug!(%key, "collection read served from cache");
                    return Ok(page);
                }
                Err(e) => {
                    // Treat an undecodable entry as a miss; it will be
                    // overwritten below.
                    warn!(%key, error = %e, "discarding corrupt cache entry");
                }
            }
        }

        counter!("listing_cache_misses_total").increment(1);

        let listings = self.listing_repository.find(filter).await?;
        let total = self.listing_repository.count(filter).await?;

        let page = ListingPage {
            listings,
            total,
            page: filter.page(),
            limit: filter.limit(),
        };

        match serde_json::to_string(&page) {
            Ok(payload) => {
                let _ = self
                    .cache
                    .set_with_ttl(&key, &payload, Some(self.cache_ttl_seconds))
                    .await;
            }
            Err(e) => warn!(%key, error = %e, "failed to serialize page for caching"),
        }

        Ok(page)
    }

    /// Serves a single-listing read, preferring cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the listing does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_listing(&self, id: i64) -> Result<Listing, AppError> {
        let key = detail_cache_key(id);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str::<Listing>(&cached) {
                Ok(listing) => {
                    counter!("listing_cache_hits_total").increment(1);
                    return Ok(listing);
                }
                Err(e) => warn!(%key, error = %e, "discarding corrupt cache entry"),
            }
        }

        counter!("listing_cache_misses_total").increment(1);

        let listing = self
            .listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found", json!({ "id": id })))?;

        match serde_json::to_string(&listing) {
            Ok(payload) => {
                let _ = self
                    .cache
                    .set_with_ttl(&key, &payload, Some(self.cache_ttl_seconds))
                    .await;
            }
            Err(e) => warn!(%key, error = %e, "failed to serialize listing for caching"),
        }

        Ok(listing)
    }

    /// Fetches the listings for a set of ids, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn by_ids(&self, ids: &[i64]) -> Result<Vec<Listing>, AppError> {
        self.listing_repository.find_by_ids(ids).await
    }

    /// Returns five randomly sampled listings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn random(&self) -> Result<Vec<Listing>, AppError> {
        self.listing_repository.sample(RANDOM_SAMPLE_COUNT).await
    }

    /// Validates, normalizes, and persists a new listing.
    ///
    /// Uploaded files are resolved to URLs through the media store; when
    /// no files are attached, pre-supplied image URLs are used instead.
    /// `city` falls back to the address-derived value. The collection
    /// cache is NOT touched: a cached page stays stale until TTL expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for more than ten images or a
    /// malformed pre-supplied URL.
    /// Returns [`AppError::Internal`] on upload or store errors.
    pub async fn create_listing(
        &self,
        mut new_listing: NewListing,
        files: Vec<MediaFile>,
    ) -> Result<Listing, AppError> {
        if files.len() > MAX_LISTING_IMAGES {
            return Err(AppError::bad_request(
                "Too many images",
                json!({ "max": MAX_LISTING_IMAGES, "provided": files.len() }),
            ));
        }

        if !files.is_empty() {
            let mut urls = Vec::with_capacity(files.len());
            for file in files {
                let url = self.media_store.upload(file).await.map_err(|e| {
                    warn!(error = %e, "media upload failed");
                    AppError::internal("Media upload failed", json!({}))
                })?;
                urls.push(url);
            }
            new_listing.image_urls = urls;
        } else {
            for image_url in &new_listing.image_urls {
                if Url::parse(image_url).is_err() {
                    return Err(AppError::bad_request(
                        "Invalid image URL",
                        json!({ "url": image_url }),
                    ));
                }
            }
        }

        if new_listing.city.is_none() {
            new_listing.city = new_listing.address.as_deref().and_then(derive_city);
        }

        self.listing_repository.insert(new_listing).await
    }

    /// Total number of listings; used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn total_listings(&self) -> Result<i64, AppError> {
        self.listing_repository.count(&ListingFilter::default()).await
    }
}
