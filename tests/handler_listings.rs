mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};

use estate_api::api::handlers::{
    create_listing_handler, list_listings_handler, listing_detail_handler,
    listings_by_ids_handler, random_listings_handler,
};

/// Build a test server with the public listing routes.
fn make_server(context: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/api/listings", get(list_listings_handler))
        .route("/api/listings/random", get(random_listings_handler))
        .route("/api/listings/create", post(create_listing_handler))
        .route("/api/listings/by-ids", post(listings_by_ids_handler))
        .route("/api/listings/{id}", get(listing_detail_handler))
        .with_state(context.state.clone());
    TestServer::new(app).unwrap()
}

// ─── Filtering ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_filtered_collection_satisfies_filter() {
    let context = common::create_test_state();
    context
        .listings
        .seed(common::new_listing("Affordable flat", 4_000_000, "Apartment", "Pune"));
    context
        .listings
        .seed(common::new_listing("Premium flat", 6_000_000, "Apartment", "Pune"));
    context
        .listings
        .seed(common::new_listing("Small villa", 3_000_000, "Villa", "Pune"));

    let server = make_server(&context);
    let response = server
        .get("/api/listings")
        .add_query_param("propertyType", "Apartment")
        .add_query_param("budget", "5000000")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let listings = body["listings"].as_array().unwrap();

    assert_eq!(listings.len(), 1);
    for listing in listings {
        assert_eq!(listing["propertyType"], "Apartment");
        assert!(listing["price"].as_i64().unwrap() <= 5_000_000);
    }
}

#[tokio::test]
async fn test_city_filter_is_case_insensitive_substring() {
    let context = common::create_test_state();
    context
        .listings
        .seed(common::new_listing("A", 1_000_000, "Apartment", "Bangalore"));
    context
        .listings
        .seed(common::new_listing("B", 1_000_000, "Apartment", "Mumbai"));

    let server = make_server(&context);
    let response = server
        .get("/api/listings")
        .add_query_param("city", "bangal")
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["listings"].as_array().unwrap().len(), 1);
    assert_eq!(body["listings"][0]["city"], "Bangalore");
}

#[tokio::test]
async fn test_search_spans_city_location_and_title() {
    let context = common::create_test_state();
    let mut by_title = common::new_listing("Lakeside retreat", 1_000_000, "Villa", "Pune");
    by_title.location = Some("Hinjewadi".to_string());
    context.listings.seed(by_title);
    context
        .listings
        .seed(common::new_listing("City flat", 1_000_000, "Apartment", "Lakeville"));
    context
        .listings
        .seed(common::new_listing("Unrelated", 1_000_000, "Apartment", "Delhi"));

    let server = make_server(&context);
    let response = server
        .get("/api/listings")
        .add_query_param("search", "lake")
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["listings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_non_numeric_price_bound_matches_nothing() {
    let context = common::create_test_state();
    context
        .listings
        .seed(common::new_listing("A", 1_000_000, "Apartment", "Pune"));

    let server = make_server(&context);
    let response = server
        .get("/api/listings")
        .add_query_param("maxPrice", "five lakh")
        .await;

    // The malformed bound poisons the filter instead of being dropped.
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["listings"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_pagination_defaults_and_second_page() {
    let context = common::create_test_state();
    for i in 0..12 {
        context.listings.seed(common::new_listing(
            &format!("Listing {}", i),
            1_000_000 + i,
            "Apartment",
            "Pune",
        ));
    }

    let server = make_server(&context);

    let first = server.get("/api/listings").await.json::<Value>();
    assert_eq!(first["listings"].as_array().unwrap().len(), 10);
    assert_eq!(first["total"], 12);
    assert_eq!(first["page"], 1);
    assert_eq!(first["limit"], 10);

    let second = server
        .get("/api/listings")
        .add_query_param("page", "2")
        .await
        .json::<Value>();
    assert_eq!(second["listings"].as_array().unwrap().len(), 2);
    assert_eq!(second["page"], 2);
}

// ─── Cache-aside ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_identical_reads_within_ttl_hit_cache() {
    let context = common::create_test_state();
    context
        .listings
        .seed(common::new_listing("A", 1_000_000, "Apartment", "Pune"));

    let server = make_server(&context);

    let first = server
        .get("/api/listings")
        .add_query_param("city", "Pune")
        .await;
    let second = server
        .get("/api/listings")
        .add_query_param("city", "Pune")
        .await;

    // One store read; the repeat is served from cache, byte-identical.
    assert_eq!(context.listings.reads(), 1);
    assert_eq!(first.text(), second.text());
}

#[tokio::test]
async fn test_cached_collection_is_stale_after_create() {
    let context = common::create_test_state();
    context
        .listings
        .seed(common::new_listing("Old", 1_000_000, "Apartment", "Pune"));

    let server = make_server(&context);

    let before = server.get("/api/listings").await.json::<Value>();
    assert_eq!(before["total"], 1);

    server
        .post("/api/listings/create")
        .json(&json!({
            "propertyTitle": "Brand new",
            "price": 2_000_000,
            "priceD": "20 L",
            "city": "Pune"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // Within the TTL the cached page still serves the old result set.
    let stale = server.get("/api/listings").await.json::<Value>();
    assert_eq!(stale["total"], 1);

    // After expiry the new listing becomes visible.
    context.cache.expire_all();
    let fresh = server.get("/api/listings").await.json::<Value>();
    assert_eq!(fresh["total"], 2);
}

// ─── Detail / by-ids / random ────────────────────────────────────────────────

#[tokio::test]
async fn test_detail_read_and_missing_listing() {
    let context = common::create_test_state();
    let seeded = context
        .listings
        .seed(common::new_listing("A", 1_000_000, "Apartment", "Pune"));

    let server = make_server(&context);

    let response = server.get(&format!("/api/listings/{}", seeded.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["title"], "A");

    server.get("/api/listings/9999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_by_ids_returns_matching_listings() {
    let context = common::create_test_state();
    let a = context
        .listings
        .seed(common::new_listing("A", 1, "Apartment", "Pune"));
    let _b = context
        .listings
        .seed(common::new_listing("B", 2, "Apartment", "Pune"));
    let c = context
        .listings
        .seed(common::new_listing("C", 3, "Apartment", "Pune"));

    let server = make_server(&context);
    let response = server
        .post("/api/listings/by-ids")
        .json(&json!({ "ids": [a.id, c.id, 404] }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_random_returns_exactly_five() {
    let context = common::create_test_state();
    for i in 0..6 {
        context.listings.seed(common::new_listing(
            &format!("L{}", i),
            1_000_000,
            "Apartment",
            "Pune",
        ));
    }

    let server = make_server(&context);

    for _ in 0..2 {
        let response = server.get("/api/listings/random").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>().as_array().unwrap().len(), 5);
    }
}

// ─── Creation ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_parses_string_encoded_coordinates() {
    let context = common::create_test_state();
    let server = make_server(&context);

    let response = server
        .post("/api/listings/create")
        .json(&json!({
            "propertyTitle": "Geo flat",
            "price": "7200000",
            "priceD": "72 L",
            "coordinates": "{\"lat\":12.9,\"lng\":77.6}"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["coordinates"]["lat"], 12.9);
    assert_eq!(body["coordinates"]["lng"], 77.6);
}

#[tokio::test]
async fn test_create_derives_city_from_address() {
    let context = common::create_test_state();
    let server = make_server(&context);

    let response = server
        .post("/api/listings/create")
        .json(&json!({
            "propertyTitle": "Address-only flat",
            "price": 5_000_000,
            "priceD": "50 L",
            "address": "12 MG Road, Indiranagar, Bangalore, 560038"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["city"], "Bangalore");
}

#[tokio::test]
async fn test_create_multipart_uploads_images() {
    let context = common::create_test_state();
    let server = make_server(&context);

    let form = MultipartForm::new()
        .add_text("propertyTitle", "Uploaded flat")
        .add_text("price", "4500000")
        .add_text("priceD", "45 L")
        .add_text("amenities", r#"{"luxury":["Pool"],"nonLuxury":["Lift"]}"#)
        .add_part(
            "images",
            Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("front.jpg")
                .mime_type("image/jpeg"),
        )
        .add_part(
            "images",
            Part::bytes(vec![0xFF, 0xD8, 0xFE])
                .file_name("back.jpg")
                .mime_type("image/jpeg"),
        );

    let response = server.post("/api/listings/create").multipart(form).await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();

    let image_urls = body["imageUrls"].as_array().unwrap();
    assert_eq!(image_urls.len(), 2);
    assert_eq!(image_urls[0], "https://cdn.test/front.jpg");
    assert_eq!(body["amenities"]["luxury"][0], "Pool");
}

#[tokio::test]
async fn test_create_rejects_missing_title() {
    let context = common::create_test_state();
    let server = make_server(&context);

    let response = server
        .post("/api/listings/create")
        .json(&json!({
            "propertyTitle": "",
            "price": 100,
            "priceD": "100"
        }))
        .await;

    response.assert_status_bad_request();
}
