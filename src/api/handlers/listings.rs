//! Handlers for listing read and creation endpoints.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{StatusCode, header},
};
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::api::dto::listing::{ByIdsRequest, CreateListingRequest, ListingQueryParams};
use crate::domain::entities::{Listing, ListingPage};
use crate::domain::listing_filter::ListingFilter;
use crate::error::AppError;
use crate::infrastructure::media::MediaFile;
use crate::state::AppState;

/// Multipart field name carrying image files.
const IMAGE_FIELD: &str = "images";

/// Serves the filtered, paginated listing collection.
///
/// # Endpoint
///
/// `GET /api/listings?city&search&type&listingType&minPrice&maxPrice&bedrooms&bathrooms&page&limit`
///
/// Reads are cache-aside with a fixed TTL; within the freshness window
/// repeated identical queries are served from cache without touching the
/// store.
///
/// # Errors
///
/// Returns 500 on store failure.
pub async fn list_listings_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingQueryParams>,
) -> Result<Json<ListingPage>, AppError> {
    let filter: ListingFilter = params.into();
    let page = state.listing_service.get_listings(&filter).await?;
    Ok(Json(page))
}

/// Serves a single listing by id (cache-aside).
///
/// # Endpoint
///
/// `GET /api/listings/{id}`
///
/// # Errors
///
/// Returns 404 when the listing does not exist.
pub async fn listing_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Listing>, AppError> {
    let listing = state.listing_service.get_listing(id).await?;
    Ok(Json(listing))
}

/// Serves five randomly sampled listings.
///
/// # Endpoint
///
/// `GET /api/listings/random`
pub async fn random_listings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>, AppError> {
    let listings = state.listing_service.random().await?;
    Ok(Json(listings))
}

/// Serves the listings matching a set of ids.
///
/// # Endpoint
///
/// `POST /api/listings/by-ids`
///
/// # Request Body
///
/// ```json
/// { "ids": [12, 7, 44] }
/// ```
pub async fn listings_by_ids_handler(
    State(state): State<AppState>,
    Json(payload): Json<ByIdsRequest>,
) -> Result<Json<Vec<Listing>>, AppError> {
    payload.validate()?;

    let listings = state.listing_service.by_ids(&payload.ids).await?;
    Ok(Json(listings))
}

/// Creates a listing from a JSON or multipart payload.
///
/// # Endpoint
///
/// `POST /api/listings/create`
///
/// # Payload Shapes
///
/// - `multipart/form-data`: text fields plus up to ten files under
///   `images`; files are uploaded to the media store and their URLs
///   persisted.
/// - `application/json`: the same fields with a pre-supplied `imageUrls`
///   array (possibly itself JSON-encoded as a string).
///
/// Nested fields (`coordinates`, `amenities`, `nearbyLandmarks`) accept
/// structured values or JSON-encoded strings. `city` is derived from the
/// address when not supplied.
///
/// # Errors
///
/// Returns 400 on validation failure, 500 on upload or store failure.
pub async fn create_listing_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let (payload, files) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &()).await.map_err(|e| {
            AppError::bad_request("Invalid multipart payload", json!({ "reason": e.to_string() }))
        })?;
        parse_multipart(multipart).await?
    } else {
        let Json(payload): Json<CreateListingRequest> =
            Json::from_request(req, &()).await.map_err(|e| {
                AppError::bad_request("Invalid JSON payload", json!({ "reason": e.to_string() }))
            })?;
        (payload, Vec::new())
    };

    payload.validate()?;

    let listing = state
        .listing_service
        .create_listing(payload.into_new_listing(), files)
        .await?;

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Collects multipart parts: files under `images`, everything else as
/// text fields deserialized through the request type's lenient parsers.
async fn parse_multipart(
    mut multipart: Multipart,
) -> Result<(CreateListingRequest, Vec<MediaFile>), AppError> {
    let mut fields = Map::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request("Invalid multipart payload", json!({ "reason": e.to_string() }))
    })? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field.bytes().await.map_err(|e| {
                AppError::bad_request(
                    "Failed to read uploaded file",
                    json!({ "reason": e.to_string() }),
                )
            })?;
            files.push(MediaFile {
                filename,
                bytes: bytes.to_vec(),
            });
        } else {
            let text = field.text().await.map_err(|e| {
                AppError::bad_request(
                    "Failed to read form field",
                    json!({ "field": name, "reason": e.to_string() }),
                )
            })?;
            fields.insert(name, Value::String(text));
        }
    }

    let payload: CreateListingRequest =
        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            AppError::bad_request("Invalid listing payload", json!({ "reason": e.to_string() }))
        })?;

    Ok((payload, files))
}
