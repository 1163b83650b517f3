//! PostgreSQL implementation of the listing repository.

use async_trait::async_trait;
use sqlx::postgres::Postgres;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Amenities, Coordinates, Listing, NewListing};
use crate::domain::listing_filter::{ListingFilter, PriceBound};
use crate::domain::repositories::ListingRepository;
use crate::error::AppError;

const LISTING_COLUMNS: &str = "id, title, price, price_display, city, location, address, \
     transaction_type, property_type, bedrooms, bathrooms, balconies, floor, furnished, \
     facing, parking, carpet_area, carpet_area_unit, image_urls, thumbnail_urls, \
     coordinates, amenities, nearby_landmarks, short_description, detailed_description, \
     is_prime_location, posted_date, created_at";

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: i64,
    title: String,
    price: i64,
    price_display: String,
    city: Option<String>,
    location: Option<String>,
    address: Option<String>,
    transaction_type: Option<String>,
    property_type: Option<String>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    balconies: Option<String>,
    floor: Option<String>,
    furnished: Option<String>,
    facing: Option<String>,
    parking: Option<String>,
    carpet_area: Option<String>,
    carpet_area_unit: Option<String>,
    image_urls: Vec<String>,
    thumbnail_urls: Vec<String>,
    coordinates: Option<Json<Coordinates>>,
    amenities: Option<Json<Amenities>>,
    nearby_landmarks: Vec<String>,
    short_description: Option<String>,
    detailed_description: Option<String>,
    is_prime_location: bool,
    posted_date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: row.id,
            title: row.title,
            price: row.price,
            price_display: row.price_display,
            city: row.city,
            location: row.location,
            address: row.address,
            transaction_type: row.transaction_type,
            property_type: row.property_type,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            balconies: row.balconies,
            floor: row.floor,
            furnished: row.furnished,
            facing: row.facing,
            parking: row.parking,
            carpet_area: row.carpet_area,
            carpet_area_unit: row.carpet_area_unit,
            image_urls: row.image_urls,
            thumbnail_urls: row.thumbnail_urls,
            coordinates: row.coordinates.map(|c| c.0),
            amenities: row.amenities.map(|a| a.0),
            nearby_landmarks: row.nearby_landmarks,
            short_description: row.short_description,
            detailed_description: row.detailed_description,
            is_prime_location: row.is_prime_location,
            posted_date: row.posted_date,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for listing storage and retrieval.
///
/// Filters are compiled at runtime with [`QueryBuilder`] because the
/// clause set depends on which fields the request supplied.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
}

impl PgListingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Appends WHERE clauses for every present filter field.
///
/// An unparseable price bound compiles to `FALSE`: the filter stays
/// well-formed but matches no rows.
fn push_filter_clauses(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    qb.push(" WHERE TRUE");

    if let Some(city) = &filter.city {
        qb.push(" AND city ILIKE ");
        qb.push_bind(format!("%{}%", city));
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (city ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR location ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR title ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    if let Some(property_type) = &filter.property_type {
        qb.push(" AND property_type = ");
        qb.push_bind(property_type.clone());
    }

    if let Some(transaction_type) = &filter.transaction_type {
        qb.push(" AND transaction_type = ");
        qb.push_bind(transaction_type.clone());
    }

    if let Some(bedrooms) = &filter.bedrooms {
        qb.push(" AND bedrooms = ");
        qb.push_bind(bedrooms.clone());
    }

    if let Some(bathrooms) = &filter.bathrooms {
        qb.push(" AND bathrooms = ");
        qb.push_bind(bathrooms.clone());
    }

    match filter.min_price_bound() {
        PriceBound::Value(min) => {
            qb.push(" AND price >= ");
            qb.push_bind(min);
        }
        PriceBound::Unparseable => {
            qb.push(" AND FALSE");
        }
        PriceBound::Absent => {}
    }

    match filter.max_price_bound() {
        PriceBound::Value(max) => {
            qb.push(" AND price <= ");
            qb.push_bind(max);
        }
        PriceBound::Unparseable => {
            qb.push(" AND FALSE");
        }
        PriceBound::Absent => {}
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM listings", LISTING_COLUMNS));
        push_filter_clauses(&mut qb, filter);

        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(filter.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset());

        let rows: Vec<ListingRow> = qb
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM listings");
        push_filter_clauses(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, AppError> {
        let row: Option<ListingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM listings WHERE id = $1",
            LISTING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Listing::from))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Listing>, AppError> {
        let rows: Vec<ListingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM listings WHERE id = ANY($1) ORDER BY created_at DESC",
            LISTING_COLUMNS
        ))
        .bind(ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn insert(&self, new_listing: NewListing) -> Result<Listing, AppError> {
        let row: ListingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO listings (
                title, price, price_display, city, location, address,
                transaction_type, property_type, bedrooms, bathrooms, balconies,
                floor, furnished, facing, parking, carpet_area, carpet_area_unit,
                image_urls, thumbnail_urls, coordinates, amenities,
                nearby_landmarks, short_description, detailed_description,
                is_prime_location, posted_date
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
            )
            RETURNING {}
            "#,
            LISTING_COLUMNS
        ))
        .bind(new_listing.title)
        .bind(new_listing.price)
        .bind(new_listing.price_display)
        .bind(new_listing.city)
        .bind(new_listing.location)
        .bind(new_listing.address)
        .bind(new_listing.transaction_type)
        .bind(new_listing.property_type)
        .bind(new_listing.bedrooms)
        .bind(new_listing.bathrooms)
        .bind(new_listing.balconies)
        .bind(new_listing.floor)
        .bind(new_listing.furnished)
        .bind(new_listing.facing)
        .bind(new_listing.parking)
        .bind(new_listing.carpet_area)
        .bind(new_listing.carpet_area_unit)
        .bind(new_listing.image_urls)
        .bind(new_listing.thumbnail_urls)
        .bind(new_listing.coordinates.map(Json))
        .bind(new_listing.amenities.map(Json))
        .bind(new_listing.nearby_landmarks)
        .bind(new_listing.short_description)
        .bind(new_listing.detailed_description)
        .bind(new_listing.is_prime_location)
        .bind(new_listing.posted_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Listing::from(row))
    }

    async fn sample(&self, n: i64) -> Result<Vec<Listing>, AppError> {
        let rows: Vec<ListingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM listings ORDER BY random() LIMIT $1",
            LISTING_COLUMNS
        ))
        .bind(n)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }
}
