//! Listing collection filter: the translation target for incoming query
//! parameters and the source of cache keys for collection reads.

/// Default page when none is supplied.
const DEFAULT_PAGE: u32 = 1;

/// Default page size when none is supplied.
const DEFAULT_LIMIT: u32 = 10;

/// Version prefix for collection cache keys.
const COLLECTION_KEY_PREFIX: &str = "listings:v1";

/// A parsed price bound.
///
/// Price bounds arrive as raw strings. A present-but-non-numeric bound is
/// kept distinct from an absent one: it must produce a filter clause that
/// matches no rows rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    Absent,
    Value(i64),
    Unparseable,
}

/// Optional filter fields for a listing collection read.
///
/// Absent fields impose no constraint; present fields combine with AND.
/// The free-text `search` field matches city, location, or title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub city: Option<String>,
    pub search: Option<String>,
    pub property_type: Option<String>,
    pub transaction_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListingFilter {
    pub fn min_price_bound(&self) -> PriceBound {
        parse_bound(self.min_price.as_deref())
    }

    pub fn max_price_bound(&self) -> PriceBound {
        parse_bound(self.max_price.as_deref())
    }

    /// Resolved page number, 1-indexed.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Resolved page size.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Row offset for the resolved page.
    pub fn offset(&self) -> i64 {
        ((self.page() - 1) as i64) * (self.limit() as i64)
    }

    /// Derives the cache key for this filter set.
    ///
    /// Fields are encoded in a fixed order with resolved pagination, so
    /// equivalent filter sets always map to the same key regardless of
    /// how the query string was spelled. The `listings:v1:` prefix keeps
    /// collection keys in their own namespace, away from the
    /// `listing:v1:<id>` detail keys.
    pub fn cache_key(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let fields: [(&str, Option<&String>); 8] = [
            ("bathrooms", self.bathrooms.as_ref()),
            ("bedrooms", self.bedrooms.as_ref()),
            ("city", self.city.as_ref()),
            ("maxPrice", self.max_price.as_ref()),
            ("minPrice", self.min_price.as_ref()),
            ("propertyType", self.property_type.as_ref()),
            ("search", self.search.as_ref()),
            ("transactionType", self.transaction_type.as_ref()),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                parts.push(format!("{}={}", name, escape_component(value)));
            }
        }

        parts.push(format!("limit={}", self.limit()));
        parts.push(format!("page={}", self.page()));

        format!("{}:{}", COLLECTION_KEY_PREFIX, parts.join("&"))
    }
}

/// Cache key for a single-listing read.
pub fn detail_cache_key(id: i64) -> String {
    format!("listing:v1:{}", id)
}

fn parse_bound(raw: Option<&str>) -> PriceBound {
    match raw {
        None => PriceBound::Absent,
        Some(s) => match s.trim().parse::<i64>() {
            Ok(value) => PriceBound::Value(value),
            Err(_) => PriceBound::Unparseable,
        },
    }
}

/// Escapes key-encoding metacharacters in a filter value.
fn escape_component(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('&', "%26")
        .replace('=', "%3D")
}
