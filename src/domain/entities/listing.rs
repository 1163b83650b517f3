//! Listing entity and related value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::flexible::f64_string_or_number;

/// Geographic position of a listing.
///
/// Client revisions send lat/lng either as numbers or as numeric strings;
/// both deserialize to `f64` and are persisted numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(deserialize_with = "f64_string_or_number")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_string_or_number")]
    pub lng: f64,
}

/// Amenity lists attached to a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    #[serde(default)]
    pub luxury: Vec<String>,
    #[serde(default)]
    pub non_luxury: Vec<String>,
}

/// A property listing.
///
/// Serializes camelCase: the cached projection and the HTTP payload are
/// the same serialized form. Physical attributes (bedrooms, bathrooms,
/// floor, carpet area) are strings because source data carries values
/// like `"3+"` and `"NA"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub price_display: String,
    pub city: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
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
    pub image_urls: Vec<String>,
    pub thumbnail_urls: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub amenities: Option<Amenities>,
    pub nearby_landmarks: Vec<String>,
    pub short_description: Option<String>,
    pub detailed_description: Option<String>,
    pub is_prime_location: bool,
    pub posted_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new listing.
///
/// Normalized by the service: media already resolved to URLs, city
/// derived from the address when absent, nested fields parsed.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub price: i64,
    pub price_display: String,
    pub city: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
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
    pub image_urls: Vec<String>,
    pub thumbnail_urls: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub amenities: Option<Amenities>,
    pub nearby_landmarks: Vec<String>,
    pub short_description: Option<String>,
    pub detailed_description: Option<String>,
    pub is_prime_location: bool,
    pub posted_date: DateTime<Utc>,
}

/// One page of a listing collection read, as served and as cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}
