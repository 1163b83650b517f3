//! DTOs for listing endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{Amenities, Coordinates, NewListing};
use crate::domain::listing_filter::ListingFilter;
use crate::utils::flexible::{i64_string_or_number, opt_string_or_value};

/// Query parameters for the listing collection read.
///
/// Field names accept the spellings of every client revision: `type` /
/// `propertyType`, `listingType` / `transactionType`, and `maxPrice` /
/// `budget` are interchangeable.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListingQueryParams {
    pub city: Option<String>,
    pub search: Option<String>,

    #[serde(rename = "type", alias = "propertyType")]
    pub property_type: Option<String>,

    #[serde(rename = "listingType", alias = "transactionType")]
    pub transaction_type: Option<String>,

    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,

    #[serde(rename = "maxPrice", alias = "budget")]
    pub max_price: Option<String>,

    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl From<ListingQueryParams> for ListingFilter {
    fn from(params: ListingQueryParams) -> Self {
        ListingFilter {
            city: params.city,
            search: params.search,
            property_type: params.property_type,
            transaction_type: params.transaction_type,
            min_price: params.min_price,
            max_price: params.max_price,
            bedrooms: params.bedrooms,
            bathrooms: params.bathrooms,
            page: params.page,
            limit: params.limit,
        }
    }
}

/// Request body for the by-ids collection read.
#[derive(Debug, Deserialize, Validate)]
pub struct ByIdsRequest {
    #[validate(length(min = 1, message = "At least one id is required"))]
    pub ids: Vec<i64>,
}

/// Request payload for listing creation.
///
/// Served by both the JSON and the multipart path: multipart text fields
/// are collected into an object and deserialized through the same
/// defensive parsers, so nested fields may arrive JSON-encoded.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[serde(alias = "propertyTitle")]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(deserialize_with = "i64_string_or_number")]
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    #[serde(alias = "priceD")]
    #[validate(length(min = 1, message = "Display price is required"))]
    pub price_display: String,

    pub city: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,

    #[serde(alias = "listingType")]
    pub transaction_type: Option<String>,
    pub property_type: Option<String>,

    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub balconies: Option<String>,
    pub floor: Option<String>,
    pub furnished: Option<String>,
    pub facing: Option<String>,
    pub parking: Option<String>,
    pub carpet_area: Option<String>,
    pub carpet_area_unit: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub image_urls: Option<Vec<String>>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub thumbnail_urls: Option<Vec<String>>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub amenities: Option<Amenities>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub nearby_landmarks: Option<Vec<String>>,

    pub short_description: Option<String>,
    pub detailed_description: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_value")]
    pub is_prime_location: Option<bool>,

    pub posted_date: Option<DateTime<Utc>>,
}

impl CreateListingRequest {
    /// Converts the validated request into the service input.
    pub fn into_new_listing(self) -> NewListing {
        NewListing {
            title: self.title,
            price: self.price,
            price_display: self.price_display,
            city: self.city,
            location: self.location,
            address: self.address,
            transaction_type: self.transaction_type,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            balconies: self.balconies,
            floor: self.floor,
            furnished: self.furnished,
            facing: self.facing,
            parking: self.parking,
            carpet_area: self.carpet_area,
            carpet_area_unit: self.carpet_area_unit,
            image_urls: self.image_urls.unwrap_or_default(),
            thumbnail_urls: self.thumbnail_urls.unwrap_or_default(),
            coordinates: self.coordinates,
            amenities: self.amenities,
            nearby_landmarks: self.nearby_landmarks.unwrap_or_default(),
            short_description: self.short_description,
            detailed_description: self.detailed_description,
            is_prime_location: self.is_prime_location.unwrap_or(false),
            posted_date: self.posted_date.unwrap_or_else(Utc::now),
        }
    }
}
